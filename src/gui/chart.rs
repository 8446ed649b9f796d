use super::{CSS_CLASS, theme, view};
use crate::config::ChartConfig;
use crate::events::{ChartEvent, Point};
use crate::geometry;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Presentational ring chart. Pure configuration-to-scene mapping: every
/// draw recomputes the layout from the current config, and pointer events
/// pass straight through as [`ChartEvent`] outputs.
pub struct RingChart {
    pub config: Rc<RefCell<ChartConfig>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum ChartMsg {
    SetValue(f64),
    SetConfig(ChartConfig),
}

#[relm4::component(pub)]
impl SimpleComponent for RingChart {
    type Init = ChartConfig;
    type Input = ChartMsg;
    type Output = ChartEvent;

    view! {
        #[root]
        #[name = "drawing_area"]
        gtk::DrawingArea {
            add_css_class: CSS_CLASS,

            add_controller = gtk::GestureClick {
                set_button: 0, // Listen to all buttons
                connect_released[sender] => move |gesture, _, x, y| {
                    let _ = sender.output(ChartEvent::Clicked {
                        button: gesture.current_button(),
                        position: Point::new(x, y),
                    });
                }
            },

            add_controller = gtk::EventControllerMotion {
                connect_enter[sender] => move |_, x, y| {
                    let _ = sender.output(ChartEvent::PointerEnter(Point::new(x, y)));
                },
                connect_leave[sender] => move |_| {
                    let _ = sender.output(ChartEvent::PointerLeave);
                }
            }
        }
    }

    fn init(
        config: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        theme::load_css();

        if let Err(e) = config.validate() {
            log::error!("Invalid chart configuration: {}", e);
        }

        let config = Rc::new(RefCell::new(config));

        let model = RingChart {
            config: config.clone(),
            drawing_area: root.clone(),
        };

        let widgets = view_output!();

        model.sync_widget();

        let config_draw = config.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            let config = config_draw.borrow();
            match geometry::layout_segments(&config) {
                Ok((geometry, segments)) => {
                    if let Err(e) = view::draw(cr, &config, &geometry, &segments) {
                        log::error!("Drawing error: {}", e);
                    }
                }
                Err(e) => log::error!("Invalid chart configuration: {}", e),
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            ChartMsg::SetValue(value) => {
                self.config.borrow_mut().current_value = value;
                self.drawing_area.queue_draw();
            }
            ChartMsg::SetConfig(new_config) => {
                if let Err(e) = new_config.validate() {
                    log::error!("Rejecting chart configuration: {}", e);
                    return;
                }
                *self.config.borrow_mut() = new_config;
                self.sync_widget();
                self.drawing_area.queue_draw();
            }
        }
    }
}

impl RingChart {
    fn sync_widget(&self) {
        let config = self.config.borrow();
        self.drawing_area.set_content_width(config.size as i32);
        self.drawing_area.set_content_height(config.size as i32);
        // Replace instead of append, so classes from a previous config do
        // not linger after SetConfig.
        self.drawing_area.set_css_classes(&widget_classes(&config));
    }
}

fn widget_classes(config: &ChartConfig) -> Vec<&str> {
    std::iter::once(CSS_CLASS)
        .chain(config.css_classes.iter().map(String::as_str))
        .collect()
}
