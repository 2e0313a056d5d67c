use std::sync::OnceLock;

use clap::{Parser, ValueEnum};
use macroquad::prelude::*;

use voronoi_viewport::{Key, KeyResponse, Point, RebuildTrigger, RenderState, Surface, ViewerConfig};

const POINT_RADIUS: f32 = 1.5;
const EDGE_THICKNESS: f32 = 2.0;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliRebuildTrigger {
    Width,
    Size,
}

impl From<CliRebuildTrigger> for RebuildTrigger {
    fn from(value: CliRebuildTrigger) -> Self {
        match value {
            CliRebuildTrigger::Width => RebuildTrigger::Width,
            CliRebuildTrigger::Size => RebuildTrigger::Size,
        }
    }
}

/// Voronoi cells of random sites, rescaled to the window. Press any key for new sites, Escape
/// to quit.
#[derive(Parser, Debug)]
#[command(name = "voronoi-viewport", version, about)]
struct Cli {
    /// Number of sites
    #[arg(long, default_value_t = 10)]
    sites: usize,

    /// Random seed for the sites
    #[arg(long)]
    seed: Option<u64>,

    /// Initial window width
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 300)]
    height: u32,

    /// Which window change rebuilds the diagram (width or size)
    #[arg(long, value_enum, default_value_t = CliRebuildTrigger::Size)]
    rebuild_on: CliRebuildTrigger,
}

impl Cli {
    fn config(&self) -> ViewerConfig {
        ViewerConfig {
            site_count: self.sites,
            seed: self.seed,
            width: self.width as f64,
            height: self.height as f64,
            rebuild_trigger: self.rebuild_on.into(),
        }
    }
}

/// Parsed once: both the window setup and the main loop need it.
fn cli() -> &'static Cli {
    static CLI: OnceLock<Cli> = OnceLock::new();
    CLI.get_or_init(Cli::parse)
}

struct MacroquadSurface;

impl Surface for MacroquadSurface {
    fn draw_point(&mut self, p: Point) {
        draw_circle(p.x as f32, p.y as f32, POINT_RADIUS, BLUE);
    }

    fn draw_line(&mut self, a: Point, b: Point) {
        draw_line(
            a.x as f32,
            a.y as f32,
            b.x as f32,
            b.y as f32,
            EDGE_THICKNESS,
            DARKGREEN,
        );
    }
}

/// The proc-macro sits in a wrapper so that it does not break rust-analyzer quick actions.
#[macroquad::main(window_conf)]
async fn main() {
    main_().await
}

fn window_conf() -> Conf {
    let cli = cli();
    Conf {
        window_title: "Voronoi cells".to_owned(),
        window_width: cli.width as i32,
        window_height: cli.height as i32,
        window_resizable: true,
        sample_count: 4,
        ..Default::default()
    }
}

async fn main_() {
    env_logger::init();
    let config = cli().config();
    log::info!("{:?}", config);

    let mut state = RenderState::new(&config);
    let mut size = None;

    loop {
        let current = (screen_width() as f64, screen_height() as f64);
        if size != Some(current) {
            size = Some(current);
            state.resize(current.0, current.1);
        }

        if is_key_pressed(KeyCode::Escape) && state.key_press(Key::Escape, "") == KeyResponse::Quit
        {
            return;
        }
        while let Some(c) = get_char_pressed() {
            if !c.is_control() {
                state.key_press(Key::Other, c.encode_utf8(&mut [0; 4]));
            }
        }

        state.run_scheduled();

        clear_background(WHITE);
        if let Err(err) = state.paint(&mut MacroquadSurface) {
            log::error!("paint aborted: {}", err);
        }

        next_frame().await
    }
}
