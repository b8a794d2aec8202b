//! Project creation, the default action of `sprout`.
//!
//! Responsibility: turn CLI arguments and config into a `ScaffoldRequest`,
//! wire the adapters, run the core pipeline, and display results.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use sprout_adapters::{LocalFilesystem, ReqwestClient, SystemCommandRunner, ZipExtractor};
use sprout_core::{
    application::{ScaffoldOptions, ScaffoldPlan, ScaffoldRequest, ScaffoldService},
    domain::{Endpoints, FALLBACK_BRANCH, ProjectName, TemplateRef},
    error::SproutError,
};

use crate::{
    cli::CreateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::CliProgress,
};

/// Project name and template after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub application_name: ProjectName,
    pub template: TemplateRef,
}

/// Apply defaults to the positional name and `--template`.
///
/// Template precedence: flag, then `template.default`, then the built-in
/// template.
pub fn resolve_invocation(args: &CreateArgs, config: &AppConfig) -> CliResult<Invocation> {
    let application_name = ProjectName::from_arg(args.name.as_deref());
    if args.name.as_deref().unwrap_or_default().is_empty() {
        warn!("No project name given, using '{FALLBACK_BRANCH}'");
    }

    let template = match (&args.template, &config.template.default) {
        (Some(flag), _) => {
            flag.parse::<TemplateRef>()
                .map_err(|e| CliError::InvalidInput {
                    message: format!("--template {flag}"),
                    source: Some(Box::new(e)),
                })?
        }
        (None, Some(configured)) => {
            configured
                .parse::<TemplateRef>()
                .map_err(|e| CliError::ConfigError {
                    message: format!("template.default = {configured:?}"),
                    source: Some(Box::new(e)),
                })?
        }
        (None, None) => TemplateRef::default(),
    };

    Ok(Invocation {
        application_name,
        template,
    })
}

/// Fold config and flags into the optional-stage switches.
fn scaffold_options(args: &CreateArgs, config: &AppConfig) -> ScaffoldOptions {
    let scaffold = &config.scaffold;
    ScaffoldOptions {
        fetch_metadata: scaffold.fetch_metadata && !args.skip_metadata,
        install_dependencies: scaffold.install_dependencies && !args.skip_install,
        initial_commit: scaffold.initial_commit && !args.no_commit,
        commit_message: args
            .message
            .clone()
            .unwrap_or_else(|| scaffold.commit_message.clone()),
    }
}

fn build_service(config: &AppConfig, output: &Arc<OutputManager>) -> CliResult<ScaffoldService> {
    let sources = &config.sources;
    let endpoints = Endpoints::new(&sources.api_base, &sources.archive_base, &sources.raw_base)
        .map_err(SproutError::from)?;
    let http = ReqwestClient::new(&sources.user_agent)?;

    Ok(ScaffoldService::new(
        Box::new(http),
        Box::new(ZipExtractor::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(SystemCommandRunner::new()),
    )
    .with_endpoints(endpoints)
    .with_progress(Box::new(CliProgress::new(Arc::clone(output)))))
}

/// Execute project creation.
///
/// Dispatch sequence:
/// 1. Resolve name, template, and options
/// 2. Wire adapters from config
/// 3. `--dry-run`: resolve the version, print the plan, stop
/// 4. Run the pipeline
/// 5. Print next-steps guidance
#[instrument(skip_all, fields(project = ?args.name, template = ?args.template))]
pub fn execute(args: CreateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Inputs
    let invocation = resolve_invocation(&args, &config)?;
    let options = scaffold_options(&args, &config);
    let working_dir = std::env::current_dir()?;

    let request = ScaffoldRequest {
        working_dir,
        application_name: invocation.application_name,
        template: invocation.template,
        options,
    };

    // 2. Adapters
    let output = Arc::new(output);
    let service = build_service(&config, &output)?;

    // 3. Dry run: look up the version only.
    if args.dry_run {
        let plan = service.plan(&request);
        return print_plan(&plan, &request, &output);
    }

    // 4. Scaffold
    let project_path = request.working_dir.join(&request.application_name);
    output.header(&format!("Creating a new app in {}", project_path.display()))?;
    output.print("")?;

    let report = service.scaffold(&request)?;

    info!(
        project = %report.plan.project_path.display(),
        version = %report.plan.version,
        bytes = report.archive_bytes,
        "Project created"
    );

    // 5. Success + next steps
    output.print("")?;
    output.success("Success!")?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", request.application_name))?;
    if report.install.is_none() {
        output.print("  # git init && npm install")?;
    }

    Ok(())
}

fn print_plan(
    plan: &ScaffoldPlan,
    request: &ScaffoldRequest,
    output: &OutputManager,
) -> CliResult<()> {
    output.info(&format!(
        "Dry run: would create '{}' at {}",
        request.application_name,
        plan.project_path.display()
    ))?;
    output.print(&format!("  Template:  {}", plan.template))?;
    match &plan.fallback {
        None => output.print(&format!("  Version:   {}", plan.version))?,
        Some(reason) => output.print(&format!(
            "  Version:   {} (latest tag unavailable: {reason})",
            plan.version
        ))?,
    }
    output.print(&format!("  Archive:   {}", plan.archive_url))?;
    let base = &request.working_dir;
    output.print(&format!(
        "  Download:  {}",
        display_relative(&plan.archive_path, base).display()
    ))?;
    output.print(&format!(
        "  Extracts:  {}",
        display_relative(&plan.extracted_path, base).display()
    ))?;

    let options = &request.options;
    output.print(&format!("  Metadata:  {}", on_off(options.fetch_metadata)))?;
    output.print(&format!("  Install:   {}", on_off(options.install_dependencies)))?;
    let commit = if options.install_dependencies && options.initial_commit {
        format!("{:?}", options.commit_message)
    } else {
        on_off(false).to_string()
    };
    output.print(&format!("  Commit:    {commit}"))?;
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "yes" } else { "skipped" }
}

fn display_relative(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: Option<&str>, template: Option<&str>) -> CreateArgs {
        CreateArgs {
            name: name.map(Into::into),
            template: template.map(Into::into),
            ..CreateArgs::default()
        }
    }

    #[test]
    fn defaults_apply_without_arguments() {
        let inv = resolve_invocation(&args(None, None), &AppConfig::default()).unwrap();
        assert_eq!(inv.application_name.as_str(), "master");
        assert_eq!(inv.template.to_string(), "alreadyExisted/das-react-template");
    }

    #[test]
    fn flag_beats_config_default() {
        let mut config = AppConfig::default();
        config.template.default = Some("acme/configured".into());

        let inv = resolve_invocation(&args(Some("app"), Some("acme/flag")), &config).unwrap();
        assert_eq!(inv.template.to_string(), "acme/flag");

        let inv = resolve_invocation(&args(Some("app"), None), &config).unwrap();
        assert_eq!(inv.template.to_string(), "acme/configured");
    }

    #[test]
    fn invalid_flag_is_a_user_error() {
        let err = resolve_invocation(&args(Some("app"), Some("noslash")), &AppConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn invalid_configured_template_is_a_config_error() {
        let mut config = AppConfig::default();
        config.template.default = Some("a/b/c".into());
        let err = resolve_invocation(&args(Some("app"), None), &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn empty_name_falls_back() {
        let inv = resolve_invocation(&args(Some(""), None), &AppConfig::default()).unwrap();
        assert!(inv.application_name.is_fallback());
    }

    #[test]
    fn flags_switch_off_configured_stages() {
        let cli = CreateArgs {
            skip_metadata: true,
            no_commit: true,
            ..CreateArgs::default()
        };
        let options = scaffold_options(&cli, &AppConfig::default());
        assert!(!options.fetch_metadata);
        assert!(options.install_dependencies);
        assert!(!options.initial_commit);
    }

    #[test]
    fn message_flag_overrides_configured_message() {
        let cli = CreateArgs {
            message: Some("chore: bootstrap".into()),
            ..CreateArgs::default()
        };
        let mut config = AppConfig::default();
        config.scaffold.install_dependencies = false;

        let options = scaffold_options(&cli, &config);
        assert_eq!(options.commit_message, "chore: bootstrap");
        assert!(!options.install_dependencies);
    }

    #[test]
    fn invalid_endpoint_is_a_config_error() {
        let mut config = AppConfig::default();
        config.sources.api_base = "ftp://example.com".into();
        let output = Arc::new(OutputManager::new(
            &crate::cli::GlobalArgs {
                verbose: 0,
                quiet: true,
                no_color: true,
                config: None,
                output_format: crate::cli::OutputFormat::Plain,
            },
            &config,
        ));
        let err = build_service(&config, &output).err().unwrap();
        assert_eq!(err.exit_code(), 4);
    }
}
