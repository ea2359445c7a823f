use anyhow::Context;
use clap::Parser;
use ghkcore::{FilterConfig, SessionController, SystemClock};
use gui_bridge::bridge::{default_bind_address, GuiBridge};
use log::info;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "g-h-k pointer tracking driver")]
struct Args {
    /// Replay a synthetic pointer path and emit a tracking summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 0.1)]
    gain_g: f64,
    #[arg(long, default_value_t = 0.1)]
    gain_h: f64,
    #[arg(long, default_value_t = 0.1)]
    gain_k: f64,
    /// Measurement noise amplitude in pixels
    #[arg(long, default_value_t = 32.0)]
    noise: f64,
    /// Noise amplitude as a power of two (2^0..=2^10); overrides --noise
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=10))]
    noise_exponent: Option<u32>,
    /// Seed for the measurement noise
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 256)]
    samples: usize,
    #[arg(long, default_value_t = 16.0)]
    interval_ms: f64,
    /// Keep the HTTP bridge alive for pointer samples from a renderer
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = default_bind_address())]
    bind: SocketAddr,
}

impl Args {
    fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            noise_amplitude: self
                .noise_exponent
                .map(FilterConfig::noise_from_exponent)
                .unwrap_or(self.noise),
            seed: self.seed,
            ..FilterConfig::with_gains(self.gain_g, self.gain_h, self.gain_k)
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.filter_config(), args.samples, args.interval_ms)
    };

    if args.offline {
        let result = Runner::new(workflow_config.clone())
            .execute()
            .context("running offline workflow")?;

        let summary = result.summary();
        println!("Offline run -> {}", summary);

        let report = format!(
            "method={} g={} h={} k={} noise={} {}\n",
            workflow_config.filter.method.as_str(),
            workflow_config.filter.gain_g,
            workflow_config.filter.gain_h,
            workflow_config.filter.gain_k,
            workflow_config.filter.noise_amplitude,
            summary
        );
        let report_path = PathBuf::from("tools/data/offline_tracking.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report {}", report_path.display()))?;
        file.write_all(report.as_bytes())?;
    }

    if args.serve {
        let session = SessionController::new(workflow_config.filter.clone(), SystemClock::new())
            .context("creating live tracking session")?;
        let gui_bridge = GuiBridge::new(Arc::new(Mutex::new(session)), args.bind);
        gui_bridge.publish_status(&format!(
            "HTTP bridge running on {} (Ctrl+C to stop)...",
            args.bind
        ));
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
        let model = gui_bridge.snapshot();
        info!(
            "bridge stopped after {} cycles ({} rejected)",
            model.processed, model.rejected
        );
    }

    if !args.offline && !args.serve {
        info!("nothing to do: pass --offline and/or --serve");
    }

    Ok(())
}
