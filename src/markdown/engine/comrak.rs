use comrak::Options;

/// Comrak options with the GitHub Flavored Markdown extensions enabled.
///
/// Heading ids are left off; they are assigned afterwards so the table of
/// contents and the anchors come from the same slugs.
pub fn create_comrak_options<'a>(unsafe_html: bool) -> Options<'a> {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.tagfilter = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;
    options.extension.header_ids = None;

    options.render.hardbreaks = false;
    options.render.github_pre_lang = true;
    // Raw HTML and comments such as `<!--more-->` pass through untouched
    options.render.unsafe_ = unsafe_html;

    options.parse.smart = true;

    options
}

pub fn render_markdown(content: &str, options: &Options) -> String {
    comrak::markdown_to_html(content, options)
}
