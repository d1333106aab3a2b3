//! APA102 light strip server
//!
//! Runs on the Pi, drives the strip over SPI and serves a tiny control
//! plane so any device on the LAN can switch animations.
//!
//! ## Architecture
//! - **Render thread** (std::thread): paints and transmits frames forever
//! - **HTTP server** (tokio/axum): swaps the active animation under the lock
//! - **Watchdog** (std::thread, optional): exits when the binary is replaced
//!
//! ## Rust concepts
//! - `#[tokio::main]` async entry point
//! - `tokio::sync::oneshot` to hear about the render thread finishing
//! - Graceful shutdown of `axum::serve` driven by that signal
//!
//! ## Usage
//! ```sh
//! ./target/release/apa102-lights --pixels 749 --animation candy_cane
//! ./target/release/apa102-lights 42   # light pixel 42 only, then exit
//! ```

#[cfg(not(feature = "hardware"))]
fn main() {
    eprintln!("This binary requires the 'hardware' feature (spidev).");
    eprintln!("Build with: cargo build --release");
    eprintln!("Tests can run without it: cargo test --no-default-features");
    std::process::exit(1);
}

#[cfg(feature = "hardware")]
fn main() {
    if let Err(e) = hardware_main() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "hardware")]
#[tokio::main(flavor = "current_thread")]
async fn hardware_main() -> Result<(), Box<dyn std::error::Error>> {
    use apa102_lights::render::{self, Environment, render_loop};
    use apa102_lights::server::{self, AppState};
    use apa102_lights::transport::SpiTransport;
    use apa102_lights::{AnimationId, Pacing, StripConfig, setup_signal_handler, watchdog};
    use clap::Parser;
    use std::future::IntoFuture;
    use std::path::PathBuf;
    use tokio::sync::oneshot;
    use tracing_subscriber::EnvFilter;

    /// APA102 light strip server
    #[derive(Parser)]
    #[command(name = "apa102-lights")]
    #[command(about = "Animation engine and HTTP switch for an APA102 LED strip")]
    #[command(version)]
    struct Args {
        /// Number of LEDs on the strip
        #[arg(long, default_value = "184")]
        pixels: usize,

        /// SPI device the strip is wired to
        #[arg(long, default_value = "/dev/spidev0.0")]
        spi_device: PathBuf,

        /// SPI clock in Hz
        #[arg(long, default_value = "2000000")]
        spi_hz: u32,

        /// Listen address for the HTTP server, empty to not run one
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Animation that "on" selects, and the one shown at startup
        #[arg(long, value_enum, default_value_t = AnimationId::Pride)]
        animation: AnimationId,

        /// Exit when this binary is replaced on disk
        #[arg(long)]
        exit_on_rebuild: bool,

        /// Light only this pixel, full white, then exit
        debug_pixel: Option<usize>,
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false) // Disable ANSI color codes for systemd/journald
        .compact()
        .init();

    let args = Args::parse();
    if args.pixels == 0 {
        return Err("--pixels must be at least 1".into());
    }
    let config = StripConfig::new(args.pixels);

    tracing::info!("APA102 lights v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Strip: {} pixels", config.pixels);
    tracing::info!("SPI: {} at {} Hz", args.spi_device.display(), args.spi_hz);

    let mut transport = SpiTransport::open(&args.spi_device, args.spi_hz)?;

    if let Some(index) = args.debug_pixel {
        tracing::info!("Debugging light {}", index);
        return render::light_single_pixel(config, index, &mut transport);
    }

    if args.exit_on_rebuild {
        watchdog::spawn(std::env::current_exe()?, watchdog::POLL_INTERVAL)?;
    }

    let running = setup_signal_handler()?;
    let env = Environment::new(config, Pacing::default(), args.animation).shared();

    // Spawn the render thread; it reports back once it stops.
    let (done_tx, done_rx) = oneshot::channel();
    let render_env = env.clone();
    std::thread::spawn(move || {
        let result = render_loop(render_env, transport, &running);
        let _ = done_tx.send(result);
    });

    let rendered = if args.listen.is_empty() {
        done_rx.await
    } else {
        let app = server::create_router(AppState {
            env,
            on: args.animation,
        });
        let listener = tokio::net::TcpListener::bind(&args.listen).await?;
        tracing::info!("Listening on http://{}", args.listen);
        tracing::info!("API Documentation: http://{}/docs", args.listen);

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let serving = tokio::spawn(
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                })
                .into_future(),
        );

        let rendered = done_rx.await;
        let _ = stop_tx.send(());
        serving.await??;
        rendered
    };

    rendered.map_err(|_| "render thread exited without reporting")??;
    tracing::info!("Stopped");
    Ok(())
}
