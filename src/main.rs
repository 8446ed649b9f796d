use anyhow::Context as _;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use ring_chart::config;
use ring_chart::{ChartConfig, ChartEvent, ChartMsg, RingChart};

struct DemoApp {
    chart: Controller<RingChart>,
}

#[derive(Debug)]
enum DemoMsg {
    Chart(ChartEvent),
    ConfigReload,
}

#[relm4::component]
impl SimpleComponent for DemoApp {
    type Init = ChartConfig;
    type Input = DemoMsg;
    type Output = ();

    view! {
        gtk::ApplicationWindow {
            set_title: Some("Ring chart"),
            set_default_size: (240, 240),

            gtk::Box {
                set_halign: gtk::Align::Center,
                set_valign: gtk::Align::Center,
                append: model.chart.widget(),
            }
        }
    }

    fn init(
        config: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let chart = RingChart::builder()
            .launch(config)
            .forward(sender.input_sender(), DemoMsg::Chart);

        let model = DemoApp { chart };
        let widgets = view_output!();

        let (tx, rx) = async_channel::bounded(8);
        relm4::spawn(config::run_async_watcher(tx));

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while rx.recv().await.is_ok() {
                sender_clone.input(DemoMsg::ConfigReload);
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            DemoMsg::Chart(event) => log::info!("Chart event: {:?}", event),
            DemoMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.chart.emit(ChartMsg::SetConfig(new_config));
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = config::write_default_config().context("failed to write default config")?;
    log::info!("Using config at {}", path.display());

    let config = config::load_or_default();
    config.validate()?;

    let app = RelmApp::new("dev.ringchart.demo");
    app.run::<DemoApp>(config);
    Ok(())
}
