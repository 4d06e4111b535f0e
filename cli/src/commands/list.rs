//! `camps list`: one page of an entity, filtered and sorted.

use std::{fs, path::Path, sync::Arc};

use anyhow::{Context as _, Result, bail};
use camps_business::{
    RecordsState,
    entities::{Entity, ingest},
    refresh_records,
    table::{
        ColumnDescriptor, TableControls, TableViewCompute, TableViewStatus, find_column,
        sync_view, table_view_ctx,
    },
};
use camps_states::StateCtx;
use tracing::{debug, info, instrument};

use crate::{
    cli::ListArgs,
    context::AppContext,
    output::Output,
    render::{footer, render_table},
};

#[instrument(skip_all, name = "list", fields(entity = E::RESOURCE, page = args.page))]
pub async fn run<E: Entity>(app: &AppContext, args: &ListArgs) -> Result<()> {
    let out = Output::new();
    let columns: Arc<[ColumnDescriptor<E>]> = E::columns().into();
    for warning in column_warnings(&columns, args) {
        out.warning(warning);
    }

    let ctx = load::<E>(app, args, &columns).await?;
    print_view::<E>(&out, &ctx, args)
}

/// Builds the view context and fills it from `--input` or the API.
pub async fn load<E: Entity>(
    app: &AppContext,
    args: &ListArgs,
    columns: &Arc<[ColumnDescriptor<E>]>,
) -> Result<StateCtx> {
    let page_size = args.page_size.unwrap_or(app.config.page_size);
    let controls = TableControls::new(page_size)?
        .with_criteria(args.criteria(E::DATE_COLUMN)?)
        .with_sort(args.sort_descriptor())
        .with_page_index(args.page_index());

    let mut ctx = table_view_ctx::<E>(Arc::clone(columns), page_size)?;
    ctx.set_state(controls)?;

    match &args.input {
        Some(path) => load_file::<E>(&mut ctx, path)?,
        None => {
            if let Err(err) = refresh_records::<E>(&mut ctx, &app.client).await {
                debug!("fetching {} failed: {err}", E::RESOURCE);
                if err.is_unauthorized() || !app.session.is_authenticated() {
                    Output::new().info("Run `camps login` to store an API token");
                }
            }
        }
    }

    sync_view::<E>(&mut ctx)?;
    Ok(ctx)
}

#[instrument(skip_all, name = "read_input")]
fn load_file<E: Entity>(ctx: &mut StateCtx, path: &Path) -> Result<()> {
    let body =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let ingested = ingest::<E>(&body)
        .with_context(|| format!("{} is not a list of {}", path.display(), E::RESOURCE))?;

    info!(
        accepted = ingested.report.accepted,
        dropped = ingested.report.dropped(),
        "read {}",
        path.display()
    );
    ctx.set_state(RecordsState::loaded(
        ingested.records,
        ingested.report.dropped(),
    ))?;
    Ok(())
}

/// Flags naming columns the pipeline will ignore.
fn column_warnings<E: Entity>(columns: &[ColumnDescriptor<E>], args: &ListArgs) -> Vec<String> {
    let mut warnings = Vec::new();

    for clause in &args.filters {
        if find_column(columns, clause.column()).is_none() {
            warnings.push(format!(
                "{} have no `{}` column, filter ignored",
                E::RESOURCE,
                clause.column()
            ));
        }
    }
    if let Some(column) = args
        .date_column
        .as_deref()
        .filter(|column| find_column(columns, column).is_none())
    {
        warnings.push(format!(
            "{} have no `{column}` column, date range ignored",
            E::RESOURCE
        ));
    }
    for key in args.sort_descriptor().keys() {
        match find_column(columns, key.column.as_str()) {
            None => warnings.push(format!(
                "{} have no `{}` column, sort ignored",
                E::RESOURCE,
                key.column
            )),
            Some(column) if !column.is_sortable() => warnings.push(format!(
                "`{}` is not sortable, sort ignored",
                key.column
            )),
            Some(_) => {}
        }
    }

    warnings
}

fn print_view<E: Entity>(out: &Output, ctx: &StateCtx, args: &ListArgs) -> Result<()> {
    let compute = ctx.try_compute::<TableViewCompute<E>>()?;
    let records = ctx.try_state::<RecordsState<E>>()?;

    if records.dropped > 0 {
        out.warning(format!(
            "{} {} record(s) were malformed or invalid and are not shown",
            records.dropped,
            E::LABEL
        ));
    }

    match (compute.status(), compute.view()) {
        (TableViewStatus::Rows, Some(view)) => {
            if view.page_index < args.page_index() {
                out.warning(format!(
                    "Page {} does not exist, showing page {}",
                    args.page,
                    view.page_index + 1
                ));
            }
            out.print(render_table(view, compute.columns()));
            out.dim(footer(view));
            Ok(())
        }
        (TableViewStatus::NoResults, _) if records.records().is_empty() => {
            out.info(format!("No {} yet", E::RESOURCE));
            Ok(())
        }
        (TableViewStatus::NoResults, _) => {
            out.info(format!("No {} match the current filters", E::RESOURCE));
            Ok(())
        }
        (TableViewStatus::Failed(reason), _) => bail!("Failed to load {}: {reason}", E::RESOURCE),
        (status, _) => bail!("{} did not finish loading ({status:?})", E::RESOURCE),
    }
}

#[cfg(test)]
mod tests {
    use camps_business::entities::{Complaint, Contributor};
    use clap::Parser as _;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    use super::*;
    use crate::{
        cli::{Cli, Commands},
        config::{CliConfig, SessionSection},
    };

    fn list_args(args: &[&str]) -> ListArgs {
        let cli = Cli::try_parse_from([&["camps", "list"][..], args].concat()).unwrap();
        match cli.command {
            Commands::List(args) => args,
            _ => panic!("expected list"),
        }
    }

    fn app(dir: &Path, base_url: &str) -> AppContext {
        let file = CliConfig {
            session: SessionSection {
                file: Some(dir.join("session.json")),
            },
            ..CliConfig::default()
        };
        AppContext::from_parts(
            &file,
            vec![("CAMPS_API_BASE_URL".to_owned(), base_url.to_owned())],
        )
        .unwrap()
    }

    fn complaints() -> serde_json::Value {
        serde_json::json!([
            {"id": 1, "title": "Water shortage", "senderName": "Ahmed", "status": "pending", "createdAt": "2024-01-10"},
            {"id": 2, "title": "Tent damage", "senderName": "Mona", "status": "resolved", "createdAt": "2024-02-01"},
            {"id": 3, "title": "Food delay", "senderName": "Sara", "status": "pending", "createdAt": "2024-03-05"},
            {"id": -4, "title": "Broken"}
        ])
    }

    async fn loaded(app: &AppContext, args: &[&str]) -> StateCtx {
        let columns: Arc<[ColumnDescriptor<Complaint>]> = Complaint::columns().into();
        load::<Complaint>(app, &list_args(args), &columns)
            .await
            .unwrap()
    }

    fn visible_ids(ctx: &StateCtx) -> Vec<i64> {
        ctx.compute::<TableViewCompute<Complaint>>()
            .unwrap()
            .view()
            .unwrap()
            .visible_rows
            .iter()
            .map(|c| c.id.0)
            .collect()
    }

    #[tokio::test]
    async fn fetches_filters_and_sorts_with_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/complaints"))
            .and(header("authorization", "Bearer t0k"))
            .respond_with(ResponseTemplate::new(200).set_body_json(complaints()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), &server.uri());
        app.session.login("admin", "t0k").unwrap();

        let ctx = loaded(
            &app,
            &["complaints", "-w", "status=pending", "--sort", "-createdAt"],
        )
        .await;

        assert_eq!(visible_ids(&ctx), vec![3, 1]);
        assert_eq!(ctx.state::<RecordsState<Complaint>>().unwrap().dropped, 1);
    }

    #[tokio::test]
    async fn server_error_is_a_failed_view() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/complaints"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), &server.uri());
        let args = list_args(&["complaints"]);
        let ctx = loaded(&app, &["complaints"]).await;

        let compute = ctx.compute::<TableViewCompute<Complaint>>().unwrap();
        assert!(matches!(compute.status(), TableViewStatus::Failed(reason) if reason.contains("500")));
        assert!(print_view::<Complaint>(&Output::new(), &ctx, &args).is_err());
    }

    #[tokio::test]
    async fn input_file_with_date_window() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("complaints.json");
        fs::write(&input, complaints().to_string()).unwrap();
        let app = app(dir.path(), "http://127.0.0.1:9");
        let input = input.to_str().unwrap();

        let ctx = loaded(
            &app,
            &["complaints", "-i", input, "--from", "2024-01-15", "--to", "2024-03-01"],
        )
        .await;
        assert_eq!(visible_ids(&ctx), vec![2]);

        let ctx = loaded(
            &app,
            &["complaints", "-i", input, "--from", "2025-01-01"],
        )
        .await;
        let compute = ctx.compute::<TableViewCompute<Complaint>>().unwrap();
        assert_eq!(compute.status(), &TableViewStatus::NoResults);
        assert!(
            print_view::<Complaint>(&Output::new(), &ctx, &list_args(&["complaints"])).is_ok()
        );
    }

    #[tokio::test]
    async fn page_past_the_end_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("complaints.json");
        fs::write(&input, complaints().to_string()).unwrap();
        let app = app(dir.path(), "http://127.0.0.1:9");

        let ctx = loaded(
            &app,
            &["complaints", "-i", input.to_str().unwrap(), "--page-size", "2", "--page", "9"],
        )
        .await;

        assert_eq!(visible_ids(&ctx), vec![3]);
        let controls = ctx.state::<TableControls>().unwrap();
        assert_eq!(controls.pagination().page_index(), 1);
        assert_eq!(controls.page_count(), 2);
    }

    #[tokio::test]
    async fn zero_page_size_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), "http://127.0.0.1:9");
        let columns: Arc<[ColumnDescriptor<Complaint>]> = Complaint::columns().into();

        let result = load::<Complaint>(&app, &list_args(&["complaints", "--page-size", "0"]), &columns).await;
        assert!(result.is_err());
    }

    #[test]
    fn unknown_and_unsortable_columns_warn() {
        let columns = Contributor::columns();
        let args = list_args(&[
            "contributors",
            "-w",
            "nickname=x",
            "--sort",
            "amount,nickname",
        ]);
        let warnings = column_warnings(&columns, &args);

        assert_eq!(warnings.len(), 2, "{warnings:?}");
        assert!(warnings.iter().all(|w| w.contains("nickname")));
        assert!(column_warnings(&columns, &list_args(&["contributors"])).is_empty());
    }
}
