use anyhow::Result;

use tack_engine::logging::{init_logging, LoggingConfig};
use tack_engine::platform::WindowInput;
use tack_engine::window::{AppControl, LogicalSize, Runtime, RuntimeConfig, WindowApp};
use tack_ui::prelude::*;

const WIDTH: f32 = 820.0;
const HEIGHT: f32 = 560.0;
const PAGE_HEIGHT: f32 = 4000.0;

/// Demo page: a toolbar pinned under the top edge, a footer bar pinned to the
/// bottom until it scrolls into view, and a side panel whose heading sticks
/// inside its own scroller.
struct Studio {
    host: MemoryHost,
    scene: UiScene,
    panel: ElementId,
    panel_dir: f32,
}

impl Studio {
    fn new() -> Self {
        let mut host = MemoryHost::new(Vec2::new(WIDTH, HEIGHT), PAGE_HEIGHT);
        let toolbar = host.add_element(Rect::new(0.0, 180.0, WIDTH, 48.0));
        let footer = host.add_element(Rect::new(0.0, 2400.0, WIDTH, 40.0));

        let panel = host.add_element(Rect::new(560.0, 300.0, 240.0, 400.0));
        host.set_scrollable(panel, 1600.0);
        host.set_selector(".side-panel", panel);
        let heading = host.add_child(panel, Rect::new(560.0, 520.0, 240.0, 32.0));

        let mut scene = UiScene::new();
        let named = [
            ("toolbar", scene.mount(&host, Affix::new(toolbar).offset_top(8.0).z_index(10))),
            (
                "footer",
                scene.mount(&host, Affix::new(footer).offset_top(None).offset_bottom(0.0)),
            ),
            (
                "heading",
                scene.mount(&host, Affix::new(heading).offset_top(0.0).container(".side-panel")),
            ),
        ];
        for (name, id) in named {
            log::info!("{name} -> {id}");
        }

        Self { host, scene, panel, panel_dir: 1.0 }
    }

    /// Slowly sweeps the side panel up and down so its heading pins and unpins.
    fn drift_panel(&mut self) {
        let Some(top) = self.host.scroll_top(self.panel) else {
            return;
        };
        if top >= 1200.0 {
            self.panel_dir = -1.0;
        } else if top <= 0.0 {
            self.panel_dir = 1.0;
        }
        if let Some(ev) = self.host.scroll_element_by(self.panel, 2.0 * self.panel_dir) {
            self.scene.dispatch(&self.host, ev);
        }
    }
}

impl WindowApp for Studio {
    fn on_input(&mut self, input: WindowInput) -> AppControl {
        let ev = match input {
            WindowInput::Resized { size } => self.host.set_viewport_size(size),
            WindowInput::Wheel { dy } => self.host.scroll_window_by(dy),
            WindowInput::CloseRequested => return AppControl::Exit,
        };
        self.scene.dispatch(&self.host, ev);
        AppControl::Continue
    }

    fn on_frame(&mut self, _frame_index: u64) -> AppControl {
        self.drift_panel();
        self.scene.frame(&self.host);

        for Emitted { source, event } in self.scene.drain_emitted() {
            let ComponentEvent::FixedChange(change) = event;
            let style = self
                .scene
                .render(source)
                .map(|v| v.style())
                .unwrap_or_default();
            log::debug!("{source}: fixed={} top={:?} style={style:?}", change.fixed, change.top);
        }
        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  tack studio — scroll the window to pin and release the affixes");
    println!("  (RUST_LOG=debug shows every fixed-change)");
    println!();

    let config = RuntimeConfig {
        title: "Tack Studio".to_string(),
        initial_size: LogicalSize::new(f64::from(WIDTH), f64::from(HEIGHT)),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, Studio::new())
}
