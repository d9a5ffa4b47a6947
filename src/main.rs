use std::{future::IntoFuture, process, sync::Arc};

use lectern::{
    application::{
        error::AppError,
        reorder::{HttpSubmitter, OrderedList, ReorderSynchronizer, configure_reorder},
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState, AdminStores},
        telemetry,
    },
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;
use uuid::Uuid;

/// Container name used for the list the `reorder` command builds.
const CLI_LIST: &str = "cli";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Reorder(args) => run_reorder(args).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;

    let csrf_secret = match settings.admin.csrf_secret.clone() {
        Some(secret) => secret,
        None => {
            warn!(
                target = "lectern::serve",
                "admin.csrf_secret is not configured; generated a per-process secret"
            );
            Uuid::new_v4().simple().to_string()
        }
    };

    let state = AdminState::new(
        AdminStores::postgres(repositories),
        &settings.admin.owner,
        &settings.admin.brand_title,
        &csrf_secret,
    );

    serve_http(&settings, state).await
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

async fn serve_http(settings: &config::Settings, state: AdminState) -> Result<(), AppError> {
    let addr = settings.server.addr;
    let grace = settings.server.graceful_shutdown;
    let router = http::build_admin_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::from(InfraError::Bind { addr, source }))?;

    info!(target = "lectern::serve", addr = %addr, "admin listening");

    let shutdown = Arc::new(Notify::new());
    let signalled = shutdown.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            signalled.notify_one();
        })
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        result = &mut server => {
            return result.map_err(|err| AppError::from(InfraError::from(err)));
        }
        () = shutdown.notified() => {
            info!(
                target = "lectern::serve",
                grace_secs = grace.as_secs(),
                "shutdown requested, draining connections"
            );
        }
    }

    match tokio::time::timeout(grace, server).await {
        Ok(result) => result.map_err(|err| AppError::from(InfraError::from(err))),
        Err(_) => {
            warn!(
                target = "lectern::serve",
                grace_secs = grace.as_secs(),
                "graceful shutdown timed out; dropping open connections"
            );
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            target = "lectern::serve",
            error = %err,
            "failed to listen for the shutdown signal"
        );
        std::future::pending::<()>().await;
    }
}

async fn run_reorder(args: config::ReorderArgs) -> Result<(), AppError> {
    let submitter = HttpSubmitter::new(args.base_url.clone())?;

    let binding = configure_reorder(CLI_LIST, args.endpoint.clone(), args.labels);
    // The synchronizer logs failures; the awaited outcome carries them to the exit code.
    let mut synchronizer = ReorderSynchronizer::new(binding, Arc::new(submitter));

    let mut list = if args.labels {
        OrderedList::labelled(CLI_LIST, args.ids)
    } else {
        OrderedList::from_ids(CLI_LIST, args.ids)
    };

    let Some(dispatched) = synchronizer.on_reorder_complete(&mut list)? else {
        info!(target = "lectern::reorder", "empty list; nothing to send");
        return Ok(());
    };

    let body = dispatched.payload().to_json()?;

    dispatched.outcome().await?;

    println!("{body}");
    if args.labels {
        for entry in list.entries() {
            println!("{}\t{}", entry.label.as_deref().unwrap_or("-"), entry.id);
        }
    }

    Ok(())
}
