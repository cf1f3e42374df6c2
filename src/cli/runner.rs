use crate::{
    cli::{
        processor::{FileProcessor, RenderSummary, WriteOptions},
        Args,
    },
    config::{loader::validate_template_suffix, Manifest},
    constants::DEFAULT_TEMPLATE_SUFFIX,
    context::ContextBuilder,
    error::{Error, Result},
    ignore::parse_ignore_file,
    metadata::PackageMetadata,
    prompt::is_interactive,
    renderer::{MiniJinjaRenderer, RenderOptions},
    template::{discovery::is_dir_like, RenderJob, TemplateDiscovery, TemplateProcessor},
    validation::validate_context,
};
use globset::GlobSet;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Main CLI runner that orchestrates loading, rendering and writing
pub struct Runner {
    args: Args,
    workdir: PathBuf,
}

impl Runner {
    pub fn new(args: Args) -> Result<Self> {
        let workdir = match &args.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(Self { args, workdir })
    }

    /// Executes the complete render workflow
    pub fn run(self) -> Result<RenderSummary> {
        if self.args.about {
            println!("{}", PackageMetadata::current().about());
            return Ok(RenderSummary::default());
        }

        let manifest = self.load_manifest()?;
        let suffix = self.template_suffix(manifest.as_ref())?;
        let context = self.build_context(manifest.as_ref())?;

        if let Some(schema) = manifest.as_ref().and_then(|m| {
            m.config.schema.as_ref().map(|schema| m.resolve_path(schema))
        }) {
            validate_context(&context, schema)?;
        }

        if self.args.print_context {
            println!("{}", serde_json::to_string_pretty(&context)?);
            return Ok(RenderSummary::default());
        }

        let jobs = self.collect_jobs(manifest.as_ref(), &suffix)?;
        let summary = self.process_jobs(&jobs, manifest.as_ref(), &context)?;

        if !summary.out_of_date.is_empty() {
            let files = summary
                .out_of_date
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::OutOfDate { count: summary.out_of_date.len(), files });
        }

        log::info!("{summary}");
        if !self.args.stdout {
            println!("Done: {summary}.");
        }
        Ok(summary)
    }

    /// Resolves a command line path against the working directory
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || path.as_os_str() == crate::constants::STDIN_INDICATOR {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }

    fn load_manifest(&self) -> Result<Option<Manifest>> {
        let explicit = self.args.manifest.as_deref().map(|path| self.resolve(path));
        if let Some(path) = &explicit {
            if !path.is_file() {
                return Err(Error::ManifestNotFound { path: path.display().to_string() });
            }
        }
        Manifest::resolve(explicit.as_deref(), &self.workdir)
    }

    fn template_suffix(&self, manifest: Option<&Manifest>) -> Result<String> {
        let suffix = self
            .args
            .suffix
            .clone()
            .or_else(|| manifest.map(|m| m.config.template_suffix.clone()))
            .unwrap_or_else(|| DEFAULT_TEMPLATE_SUFFIX.to_string());
        validate_template_suffix(&suffix)?;
        Ok(suffix)
    }

    fn strict(&self, manifest: Option<&Manifest>) -> bool {
        self.args.strict || manifest.is_some_and(|m| m.config.strict)
    }

    /// Layers every context source in precedence order
    fn build_context(&self, manifest: Option<&Manifest>) -> Result<serde_json::Value> {
        let mut builder = ContextBuilder::new();

        if let Some(manifest) = manifest {
            builder.merge(manifest.config.variables.clone());
            for file in &manifest.config.context {
                builder.merge_file(manifest.resolve_path(file))?;
            }
        }
        for file in &self.args.context {
            builder.merge_file(self.resolve(file))?;
        }

        let environment = manifest.map_or(true, |m| m.config.environment);
        if environment && !self.args.no_env {
            builder.with_env(std::env::vars_os().filter_map(|(key, value)| {
                Some((key.into_string().ok()?, value.into_string().ok()?))
            }));
        }
        for assignment in &self.args.set {
            builder.set(assignment)?;
        }

        Ok(builder.build())
    }

    /// Expands command line templates, or the manifest's, into render jobs
    fn collect_jobs(&self, manifest: Option<&Manifest>, suffix: &str) -> Result<Vec<RenderJob>> {
        let discovery = TemplateDiscovery::new(suffix);

        let inputs: Vec<(PathBuf, Option<PathBuf>)> = if !self.args.templates.is_empty() {
            let output = self.args.output.as_deref().map(|path| self.resolve(path));
            if let Some(output) = &output {
                if self.args.templates.len() > 1 && !is_dir_like(output) {
                    return Err(Error::AmbiguousOutput { path: output.display().to_string() });
                }
            }
            self.args.templates.iter().map(|t| (self.resolve(t), output.clone())).collect()
        } else if let Some(manifest) = manifest.filter(|m| !m.config.templates.is_empty()) {
            manifest
                .config
                .templates
                .iter()
                .map(|(source, target)| {
                    (manifest.resolve_path(source), Some(manifest.resolve_path(target)))
                })
                .collect()
        } else {
            return Err(Error::NoTemplates);
        };

        let mut jobs = Vec::new();
        for (input, output) in inputs {
            let found = discovery.discover(&input, output.as_deref())?;
            if input.is_dir() {
                if let Some(output) = output.as_deref().filter(|o| o.is_file()) {
                    return Err(Error::AmbiguousOutput { path: output.display().to_string() });
                }
            }
            jobs.extend(found);
        }
        log::debug!("Collected {} render job(s)", jobs.len());
        Ok(jobs)
    }

    /// Renders every job, sharing one engine and ignore set per template root
    fn process_jobs(
        &self,
        jobs: &[RenderJob],
        manifest: Option<&Manifest>,
        context: &serde_json::Value,
    ) -> Result<RenderSummary> {
        let strict = self.strict(manifest);
        let extra_ignores = manifest.map(|m| m.config.ignore.as_slice()).unwrap_or_default();

        let mut roots: IndexMap<PathBuf, (MiniJinjaRenderer, GlobSet)> = IndexMap::new();
        for job in jobs {
            if !roots.contains_key(&job.root) {
                let options = RenderOptions { strict, search_root: Some(job.root.clone()) };
                let engine = MiniJinjaRenderer::with_options(&options);
                let ignore = parse_ignore_file(&job.root, extra_ignores)?;
                roots.insert(job.root.clone(), (engine, ignore));
            }
        }

        let options = WriteOptions {
            force: self.args.force,
            interactive: !self.args.non_interactive && is_interactive(),
            dry_run: self.args.dry_run || self.args.check,
            check: self.args.check,
            stdout: self.args.stdout,
            separators: jobs.len() > 1,
        };
        let mut file_processor = FileProcessor::new(options);

        for job in jobs {
            let Some((engine, ignore)) = roots.get(&job.root) else {
                continue;
            };
            let processor = TemplateProcessor::new(engine, context, ignore);
            match processor.process(job) {
                Ok(operation) => file_processor.apply(&operation)?,
                Err(e @ Error::ProcessError { .. }) => log::warn!("{e}"),
                Err(e) => return Err(e),
            }
        }

        Ok(file_processor.into_summary())
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<RenderSummary> {
    Runner::new(args)?.run()
}
