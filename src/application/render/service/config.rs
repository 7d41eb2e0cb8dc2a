use std::borrow::Cow;

use ammonia::Builder as AmmoniaBuilder;
use comrak::options::Options;

use crate::application::render::types::RenderPipelineConfig;

pub(crate) fn build_options(config: &RenderPipelineConfig) -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options, config);
    configure_render(&mut options, config);
    options
}

/// Ammonia's stock allow-list plus task list checkboxes. Scripts and styles
/// are dropped together with their content, event handler attributes are
/// removed, and URLs are limited to the default scheme set.
pub(crate) fn build_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    builder.add_tags(&["input"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);

    builder.attribute_filter(|element, attribute, value| {
        if element == "input" && attribute == "type" && !value.eq_ignore_ascii_case("checkbox") {
            None
        } else {
            Some(Cow::Borrowed(value))
        }
    });

    builder
}

fn configure_extensions(options: &mut Options<'static>, config: &RenderPipelineConfig) {
    let ext = &mut options.extension;
    ext.strikethrough = config.gfm;
    ext.table = config.gfm;
    ext.autolink = config.gfm;
    ext.tasklist = config.gfm;
    // Disallowed raw tags are handled by the sanitizer, not the converter.
    ext.tagfilter = false;
}

fn configure_render(options: &mut Options<'static>, config: &RenderPipelineConfig) {
    let render = &mut options.render;
    render.hardbreaks = config.hard_breaks;
    render.github_pre_lang = config.gfm;
    // Raw HTML passes through conversion untouched; sanitisation runs next.
    render.r#unsafe = true;
    render.sourcepos = false;
}
