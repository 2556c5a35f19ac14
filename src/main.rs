use std::process::ExitCode;

use sts_service::keys::{self, diagnostics, FsKeySource};
use sts_service::telemetry::{init_tracing, TracingConfig};
use sts_service::{api, shutdown, Config, StsService};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&TracingConfig::default());
            error!(error = %e, "Invalid configuration");
            return Ok(ExitCode::FAILURE);
        }
    };

    init_tracing(
        &TracingConfig::default()
            .with_log_level(config.log_level.clone())
            .with_json_output(config.log_json),
    );

    info!("Starting Secure Token Service");

    diagnostics::log_candidate_locations(&config.key_paths);

    let key_material =
        match keys::bootstrap(&config.key_paths, &FsKeySource, config.jwt_algorithm) {
            Ok((material, _path)) => material,
            Err(e) => {
                error!(error = %e, code = e.code(), "Cannot start without a usable signing key");
                // Give log shippers time to collect this before the supervisor restarts us.
                tokio::time::sleep(config.startup_failure_delay).await;
                return Ok(ExitCode::FAILURE);
            }
        };

    let sts = StsService::from_config(key_material, &config);
    let app = api::create_router(sts);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Secure Token Service listening");

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(ExitCode::SUCCESS);
        }
        () = shutdown::wait_for_signal() => {}
    }

    let _ = stop_tx.send(true);
    match tokio::time::timeout(config.shutdown_timeout, &mut server).await {
        Ok(result) => {
            result??;
            info!("Shutdown complete");
        }
        Err(_) => {
            warn!("Shutdown timeout reached, aborting open connections");
            server.abort();
        }
    }

    Ok(ExitCode::SUCCESS)
}
