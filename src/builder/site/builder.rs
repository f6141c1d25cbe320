use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use liquid::model::{KString, Value};
use log::{debug, info, log, warn, Level};

use crate::ancillary::{build_feed_items, ArtifactGenerator, SiteMeta};
use crate::builder::page::{discover_content, Page, PageId, PageKind};
use crate::builder::site::context::{page_context, paginator_context, site_context, SiteIndex};
use crate::builder::site::parallel::run_phase;
use crate::builder::types::{BuildOptions, BuildResult};
use crate::collections::{
    build_taxonomies, filter_drafts, filter_expired, filter_future, generate_taxonomy_pages,
    link_prev_next, paginate, sort_by_date,
};
use crate::config::{load_config, validate_config, Config};
use crate::directory::{output_path_for_url, FsWriter, OutputWriter};
use crate::layout::Engine;
use crate::markdown::{
    count_words, extract_summary, reading_time, strip_html, ComrakRenderer, MarkdownRenderer,
};
use crate::utils::{BuildError, BuildResultExt};

/// Retried once when the cascade finds nothing
const FALLBACK_TEMPLATE: &str = "_default/single.html";
const NOT_FOUND_TEMPLATE: &str = "404.html";
const NOT_FOUND_URL: &str = "/404.html";

/// One template execution: a page, or one extra pager of a listing page
struct RenderJob {
    /// Position of the page in the sorted page list
    page: usize,
    url: String,
    paginator: Option<Value>,
}

/// Top-level template variables, borrowed from contexts built once per build
type Globals<'a> = HashMap<KString, &'a Value>;

/// Builds one site, once.
///
/// Owns the configuration and every collaborator for a single build; a new
/// builder is created per invocation.
pub struct SiteBuilder {
    config: Config,
    options: BuildOptions,
    renderer: Box<dyn MarkdownRenderer>,
    writer: Box<dyn OutputWriter>,
    generators: Vec<Box<dyn ArtifactGenerator>>,
}

impl SiteBuilder {
    /// Create a builder; options that override configuration are applied here
    pub fn new(mut config: Config, options: BuildOptions) -> Self {
        if let Some(output_dir) = &options.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(base_url) = &options.base_url {
            config.base_url = base_url.clone();
        }

        SiteBuilder {
            config,
            options,
            renderer: Box::new(ComrakRenderer::new()),
            writer: Box::new(FsWriter),
            generators: Vec::new(),
        }
    }

    /// Load the configuration from `options.project_root` and create a builder
    pub fn load(options: BuildOptions) -> Result<Self, BuildError> {
        let config = load_config(&options.project_root)?;
        Ok(Self::new(config, options))
    }

    pub fn with_renderer(mut self, renderer: Box<dyn MarkdownRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_writer(mut self, writer: Box<dyn OutputWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_generator(mut self, generator: Box<dyn ArtifactGenerator>) -> Self {
        self.generators.push(generator);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole pipeline and write the site
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let started = Instant::now();
        let now = Utc::now();
        validate_config(&self.config)?;

        let output_dir = self.config.output_path();
        info!("Building site into {}", output_dir.display());
        self.writer.clean_dir(&output_dir).at_path(&output_dir)?;

        let layouts_dir = self.config.layouts_path();
        let theme_dir = self.config.theme_layouts_path();
        let engine = Engine::new(theme_dir.as_deref(), Some(&layouts_dir), &self.config.base_url)
            .map_err(|source| BuildError::Template {
                path: layouts_dir.clone(),
                source,
            })?;
        debug!("Templates: {}", engine.template_names().join(", "));

        // Content
        let discovered = discover_content(&self.config.content_path(), &self.config.base_url)?;
        let mut next_id = discovered.len();
        let mut pages = self.filter_pages(discovered, now);

        if !pages.iter().any(|page| page.kind == PageKind::Home) {
            debug!("No home page in content, adding one");
            pages.push(self.home_page(PageId(next_id)));
            next_id += 1;
        }

        self.render_markdown(&mut pages)?;

        let taxonomies = build_taxonomies(&pages, &self.config.taxonomies);
        let taxonomy_pages = generate_taxonomy_pages(&taxonomies, next_id, &self.config.base_url);
        next_id += taxonomy_pages.len();
        info!(
            "Built {} taxonomies with {} pages",
            taxonomies.len(),
            taxonomy_pages.len()
        );
        pages.extend(taxonomy_pages);

        sort_by_date(&mut pages);
        link_prev_next(&mut pages);

        // Templates
        let index = SiteIndex::new(&pages, &taxonomies);
        let site = Value::Object(site_context(&self.config, &index));
        let author = self.config.author.as_deref();
        let contexts: Vec<Value> = pages
            .iter()
            .map(|page| Value::Object(page_context(page, &index, author)))
            .collect();

        let jobs = self.render_jobs(&pages, &index);
        info!("Rendering {} outputs for {} pages", jobs.len(), pages.len());

        let mut outputs = run_phase("template", &jobs, |job| {
            let page = &pages[job.page];
            let globals = globals(&site, &contexts[job.page], job.paginator.as_ref());
            let html = render_page(&engine, page, &globals)?;
            Ok((job.url.clone(), html))
        })?;

        if engine.has_template(NOT_FOUND_TEMPLATE) {
            let not_found = self.not_found_page(PageId(next_id));
            let context = Value::Object(page_context(&not_found, &index, author));
            let globals = globals(&site, &context, None);
            let html = engine
                .execute(NOT_FOUND_TEMPLATE, &globals)
                .map_err(|source| BuildError::Template {
                    path: PathBuf::from(NOT_FOUND_TEMPLATE),
                    source,
                })?;
            outputs.push((NOT_FOUND_URL.to_string(), html));
        }

        outputs.sort_by(|a, b| a.0.cmp(&b.0));
        for pair in outputs.windows(2) {
            if pair[0].0 == pair[1].0 {
                warn!("Two outputs render to {}; the later one wins", pair[0].0);
            }
        }

        // Output
        let write_level = if self.options.verbose { Level::Info } else { Level::Debug };
        let mut result = BuildResult::default();
        for (url, html) in &outputs {
            let written = self
                .writer
                .write_file(&output_dir, url, html.as_bytes())
                .at_path(&output_path_for_url(&output_dir, url))?;
            log!(write_level, "Wrote {} ({} bytes)", url, written);
            result.output_size += written;
            result.files_written += 1;
        }
        result.pages_rendered = outputs.len();
        result.urls = outputs.into_iter().map(|(url, _)| url).collect();

        self.copy_bundle_assets(&pages, &output_dir, &mut result)?;

        let static_dir = self.config.static_path();
        let stats = self
            .writer
            .copy_dir(&static_dir, &output_dir)
            .at_path(&static_dir)?;
        debug!("Copied {} static files", stats.files);
        result.files_copied += stats.files;
        result.output_size += stats.bytes;

        self.run_generators(&pages, &output_dir, now, &mut result)?;

        result.duration = started.elapsed();
        info!(
            "Rendered {} pages, wrote {} files and copied {} in {:?}",
            result.pages_rendered, result.files_written, result.files_copied, result.duration
        );

        Ok(result)
    }

    /// Apply the draft, future and expiry filters the options leave on
    fn filter_pages(&self, pages: Vec<Page>, now: DateTime<Utc>) -> Vec<Page> {
        let total = pages.len();
        let mut pages = pages;

        if !self.options.include_drafts {
            pages = filter_drafts(&pages);
        }
        if !self.options.include_future {
            pages = filter_future(&pages, now);
        }
        if !self.options.include_expired {
            pages = filter_expired(&pages, now);
        }

        if pages.len() < total {
            info!("Skipped {} unpublished pages", total - pages.len());
        }
        pages
    }

    fn home_page(&self, id: PageId) -> Page {
        let mut home = Page::new(id, PageKind::Home);
        home.title = if self.config.title.is_empty() {
            "Home".to_string()
        } else {
            self.config.title.clone()
        };
        home.assign_url(&self.config.base_url);
        home
    }

    fn not_found_page(&self, id: PageId) -> Page {
        let mut page = Page::new(id, PageKind::Single);
        page.title = "Page Not Found".to_string();
        page.url = NOT_FOUND_URL.to_string();
        page.permalink = crate::builder::page::make_permalink(&self.config.base_url, NOT_FOUND_URL);
        page
    }

    /// Render every page body concurrently, then derive summaries and counts
    fn render_markdown(&self, pages: &mut [Page]) -> Result<(), BuildError> {
        let renderer = self.renderer.as_ref();
        let rendered = run_phase("markdown", pages, |page| {
            renderer
                .render_with_toc(&page.raw_content)
                .map_err(|source| BuildError::Markdown {
                    path: page.origin(),
                    source,
                })
        })?;

        for (page, (content, toc)) in pages.iter_mut().zip(rendered) {
            page.content = content;
            page.table_of_contents = toc;
            if page.summary.is_empty() {
                page.summary = extract_summary(&page.content, self.config.summary_length);
            }
            page.word_count = count_words(&strip_html(&page.content));
            page.reading_time = reading_time(page.word_count);
        }

        info!("Rendered Markdown for {} pages", pages.len());
        Ok(())
    }

    /// One job per page; listing pages get one per pager instead
    fn render_jobs(&self, pages: &[Page], index: &SiteIndex) -> Vec<RenderJob> {
        let mut jobs = Vec::with_capacity(pages.len());

        for (position, page) in pages.iter().enumerate() {
            if !page.kind.is_listing() {
                jobs.push(RenderJob {
                    page: position,
                    url: page.url.clone(),
                    paginator: None,
                });
                continue;
            }

            let listed = index.listed_pages(page);
            for pager in paginate(&listed, self.config.paginate, &page.url) {
                jobs.push(RenderJob {
                    page: position,
                    url: pager.url.clone(),
                    paginator: Some(Value::Object(paginator_context(&pager, index))),
                });
            }
        }

        jobs
    }

    /// Copy each bundle's assets next to the bundle page's output
    fn copy_bundle_assets(&self, pages: &[Page], output_dir: &Path, result: &mut BuildResult) -> Result<(), BuildError> {
        for page in pages.iter().filter(|page| page.is_bundle) {
            let page_file = output_path_for_url(output_dir, &page.url);
            let target_dir = page_file.parent().unwrap_or(output_dir);

            for asset in &page.bundle_files {
                let Some(name) = asset.file_name() else {
                    continue;
                };
                result.output_size += self
                    .writer
                    .copy_file(asset, &target_dir.join(name))
                    .at_path(asset)?;
                result.files_copied += 1;
            }
        }
        Ok(())
    }

    fn run_generators(
        &self,
        pages: &[Page],
        output_dir: &Path,
        now: DateTime<Utc>,
        result: &mut BuildResult,
    ) -> Result<(), BuildError> {
        if self.generators.is_empty() {
            return Ok(());
        }

        let mut meta = SiteMeta::from_config(&self.config, now);
        meta.minify = self.options.minify;
        let items = build_feed_items(pages);

        for generator in &self.generators {
            let name = generator.file_name();
            let bytes = generator
                .generate(&meta, &items)
                .map_err(|err| BuildError::Artifact {
                    name: name.to_string(),
                    message: err.to_string(),
                })?;

            let url = format!("/{}", name.trim_start_matches('/'));
            result.output_size += self
                .writer
                .write_file(output_dir, &url, &bytes)
                .at_path(&output_path_for_url(output_dir, &url))?;
            result.files_written += 1;
            debug!("Generated {} ({} bytes)", name, bytes.len());
        }
        Ok(())
    }
}

fn globals<'a>(site: &'a Value, page: &'a Value, paginator: Option<&'a Value>) -> Globals<'a> {
    let mut globals = Globals::with_capacity(3);
    globals.insert(KString::from_static("site"), site);
    globals.insert(KString::from_static("page"), page);
    if let Some(paginator) = paginator {
        globals.insert(KString::from_static("paginator"), paginator);
    }
    globals
}

/// Resolve and execute the page's template, falling back to the bare body
fn render_page(engine: &Engine, page: &Page, globals: &Globals) -> Result<String, BuildError> {
    let template = engine
        .resolve(page.kind, &page.section, page.layout.as_deref())
        .or_else(|| {
            engine
                .has_template(FALLBACK_TEMPLATE)
                .then(|| FALLBACK_TEMPLATE.to_string())
        });

    match template {
        Some(name) => {
            debug!("Rendering {} with {}", page.url, name);
            engine
                .execute(&name, globals)
                .map_err(|source| BuildError::Template {
                    path: page.origin(),
                    source,
                })
        }
        None => {
            warn!(
                "No template for {} page {}; writing its content without a layout",
                page.kind.as_str(),
                page.url
            );
            Ok(page.content.clone())
        }
    }
}
