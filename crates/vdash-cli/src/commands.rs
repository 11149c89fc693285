//! Command implementations: one user interaction per invocation.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use vdash_ingest::{IngestError, load_default, load_upload};
use vdash_model::{AccessPolicy, ColumnRole, LoginOutcome, RoleMap, Session};
use vdash_report::{compute_kpis, group_thousands, preview, select_cards};

use crate::cli::{RolesArgs, ShowArgs};
use crate::render::{metric_table, preview_table};

/// The full request/response cycle: authenticate, load, compute, render.
pub fn run_show(args: &ShowArgs) -> Result<()> {
    let roles = load_roles(args.roles.as_deref())?;

    let policy = AccessPolicy::from_env();
    let mut session = Session::new();
    authenticate(&policy, &mut session, args.password.as_deref())?;

    let span = info_span!("show");
    let _guard = span.enter();

    let df = load_table(args, &roles)?;
    let kpis = compute_kpis(&df, &roles).context("compute KPI set")?;

    if args.json {
        let json = serde_json::to_string_pretty(&kpis).context("serialize KPI set")?;
        println!("{json}");
        return Ok(());
    }

    let cards = select_cards(&kpis, df.width());
    println!("{}", metric_table(&cards));

    println!(
        "Records: {}   Columns: {}",
        group_thousands(df.height() as u64),
        df.width()
    );

    let excerpt = preview(&df, args.limit).context("build preview excerpt")?;
    println!("{}", preview_table(&excerpt)?);

    Ok(())
}

/// Print the active column-role mapping and numeric indicators.
pub fn run_roles(args: &RolesArgs) -> Result<()> {
    let roles = load_roles(args.roles.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["Role", "Column", "Synonyms"]);
    crate::render::apply_listing_style(&mut table);
    for role in ColumnRole::ALL {
        let Some(spec) = roles.roles.get(&role) else {
            continue;
        };
        table.add_row(vec![
            role.as_str().to_string(),
            spec.column.clone(),
            spec.synonyms.join(", "),
        ]);
    }
    println!("{table}");
    println!("Numeric indicators: {}", roles.numeric_indicators.join(", "));
    Ok(())
}

fn load_roles(path: Option<&Path>) -> Result<RoleMap> {
    match path {
        Some(path) => RoleMap::from_json_file(path)
            .with_context(|| format!("load role map {}", path.display())),
        None => Ok(RoleMap::default()),
    }
}

/// Load from the upload when given, otherwise from the bundled sample
/// with a fall-back message pointing at `--file`.
fn load_table(args: &ShowArgs, roles: &RoleMap) -> Result<DataFrame> {
    if let Some(file) = &args.file {
        return load_upload(file, roles)
            .with_context(|| format!("load uploaded file {}", file.display()));
    }

    match load_default(&args.sample) {
        Ok(df) => Ok(df),
        Err(error @ (IngestError::SourceUnavailable { .. } | IngestError::EmptyData { .. })) => {
            warn!(%error, "sample data unavailable");
            bail!(
                "no usable sample data at {}; supply your own CSV with --file",
                args.sample.display()
            );
        }
        Err(error) => {
            Err(error).with_context(|| format!("load sample file {}", args.sample.display()))
        }
    }
}

/// Gate the interaction behind the configured password, if any.
///
/// A password given on the command line is checked once; otherwise the
/// prompt loops on stdin until the password matches or input ends. A
/// mismatch only re-prompts: no lockout, no backoff.
fn authenticate(policy: &AccessPolicy, session: &mut Session, provided: Option<&str>) -> Result<()> {
    if !policy.requires_login() {
        return Ok(());
    }

    if let Some(attempt) = provided {
        return match session.login(policy, attempt) {
            LoginOutcome::Granted | LoginOutcome::NotRequired => Ok(()),
            LoginOutcome::Denied => bail!("incorrect password"),
        };
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        eprint!("Password: ");
        io::stderr().flush().ok();
        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("read password from stdin")?;
        if read == 0 {
            bail!("authentication aborted");
        }
        let attempt = line.trim_end_matches(['\r', '\n']);
        match session.login(policy, attempt) {
            LoginOutcome::Granted | LoginOutcome::NotRequired => {
                info!("access granted");
                return Ok(());
            }
            LoginOutcome::Denied => {
                eprintln!("Incorrect password. Please try again.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn cli_password_grants_access_once() {
        let policy = AccessPolicy::PasswordProtected {
            password: "s3cret".to_string(),
        };
        let mut session = Session::new();
        authenticate(&policy, &mut session, Some("s3cret")).expect("auth");
        assert!(session.is_authorized(&policy));
    }

    #[test]
    fn cli_password_mismatch_fails() {
        let policy = AccessPolicy::PasswordProtected {
            password: "s3cret".to_string(),
        };
        let mut session = Session::new();
        let result = authenticate(&policy, &mut session, Some("wrong"));
        assert!(result.is_err());
        assert!(!session.is_authorized(&policy));
    }

    #[test]
    fn open_policy_skips_authentication() {
        let mut session = Session::new();
        authenticate(&AccessPolicy::Open, &mut session, None).expect("auth");
    }

    #[test]
    fn missing_sample_points_at_file_flag() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let args = ShowArgs {
            file: None,
            sample: dir.path().join("sample.csv"),
            roles: None,
            limit: 3,
            json: false,
            password: None,
        };
        let error = load_table(&args, &RoleMap::default()).expect_err("missing sample");
        assert!(error.to_string().contains("--file"));
    }

    #[test]
    fn upload_path_is_used_when_given() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        write!(file, "Company\nAcme\nBeta\n").expect("write csv");
        let args = ShowArgs {
            file: Some(file.path().to_path_buf()),
            sample: "does-not-exist.csv".into(),
            roles: None,
            limit: 3,
            json: false,
            password: None,
        };
        let df = load_table(&args, &RoleMap::default()).expect("load upload");
        assert_eq!(df.height(), 2);
    }
}
