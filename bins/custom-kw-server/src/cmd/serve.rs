use std::future::Future;

use custom_kw_messaging::{MessageServer, MessagingError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::ServeArgs;
use crate::error::ServerError;

pub async fn run(args: ServeArgs) -> Result<(), ServerError> {
    let server = MessageServer::bind(&args.addr).await?;
    let token = CancellationToken::new();
    let server_task = tokio::spawn(server.run(token.clone()));

    tracing::info!("message server started, press Ctrl+C to stop");
    supervise(server_task, token, tokio::signal::ctrl_c()).await
}

/// Wait for either the shutdown signal or the server task ending on its own.
async fn supervise(
    mut server_task: JoinHandle<Result<(), MessagingError>>,
    token: CancellationToken,
    shutdown: impl Future<Output = std::io::Result<()>>,
) -> Result<(), ServerError> {
    let stopped = tokio::select! {
        signal = shutdown => {
            signal?;
            None
        }
        finished = &mut server_task => Some(finished),
    };

    let finished = match stopped {
        Some(finished) => {
            tracing::error!("message server stopped unexpectedly");
            finished
        }
        None => {
            tracing::info!("shutting down...");
            token.cancel();
            server_task.await
        }
    };

    match finished {
        Ok(result) => Ok(result?),
        Err(e) => {
            tracing::error!(error = %e, "message server task failed");
            Err(ServerError::ServerTask(e.to_string()))
        }
    }
}
