use glow::HasContext;
use lander_core::{
    FixedTimestep, GameState,
    level::{self, LevelTextures},
};

use crate::{abs::App, error::ClientError, render::GlSpriteRenderer, settings::Settings};

mod abs;
mod error;
mod input;
mod logging;
mod render;
mod settings;

const TITLE: &str = "Rocket Lander";

fn main() {
    if let Err(e) = run() {
        match &e {
            ClientError::Logger(_) => eprintln!("{e}"),
            _ => log::error!("{e}"),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<(), ClientError> {
    let settings_path = Settings::default_path();
    let (settings, warning) = Settings::load_or_default(settings_path.as_deref());
    logging::init(settings.level_filter())?;
    if let Some(warning) = warning {
        log::warn!("{warning}");
    }

    let mut app = App::new(TITLE, settings.width, settings.height, settings.fullscreen)
        .map_err(ClientError::Sdl)?;
    if let Err(e) = app.set_vsync(settings.vsync) {
        log::warn!("Could not change vsync: {e}");
    }
    let (width, height) = app.window.drawable_size();
    unsafe {
        app.gl.viewport(0, 0, width as i32, height as i32);
    }

    let mut renderer = GlSpriteRenderer::new(&app.gl)?;
    let assets = &settings.asset_dir;
    let textures = LevelTextures {
        font: renderer.load_texture(&assets.join(level::FONT_FILE))?,
        player: renderer.load_texture(&assets.join(level::PLAYER_FILE))?,
        platform: renderer.load_texture(&assets.join(level::PLATFORM_FILE))?,
        target: renderer.load_texture(&assets.join(level::TARGET_FILE))?,
    };

    let mut state = GameState::new(&textures)?;
    let mut timestep = FixedTimestep::starting_at(app.seconds());

    loop {
        let input = input::poll(&mut app.event_pump);
        if input.quit {
            break;
        }
        state.apply_input(&input);

        timestep.advance(app.seconds(), |dt| state.step(dt));

        state.render(&mut renderer);
        app.window.gl_swap_window();
    }

    log::info!("Closing with outcome {:?}", state.outcome());
    Ok(())
}
