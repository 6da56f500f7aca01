use std::borrow::Cow;

use ratatui::text::{Line, Span};

use crate::context::RowContext;

#[derive(Clone, Copy)]
pub struct GlyphSet<'a> {
    pub indent: &'a str,
    pub branch_last: &'a str,
    pub branch: &'a str,
    pub vert: &'a str,
    pub empty: &'a str,
    pub expanded: &'a str,
    pub collapsed: &'a str,
    pub selected: &'a str,
    pub unselected: &'a str,
}

impl GlyphSet<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "   ",
            branch_last: "└──",
            branch: "├──",
            vert: "│  ",
            empty: "   ",
            expanded: "▼",
            collapsed: "▶",
            selected: "◉",
            unselected: "○",
        }
    }

    pub const fn ascii() -> Self {
        Self {
            indent: "   ",
            branch_last: "`--",
            branch: "|--",
            vert: "|  ",
            empty: "   ",
            expanded: "v",
            collapsed: ">",
            selected: "[x]",
            unselected: "[ ]",
        }
    }
}

pub type LeafLabelFn<R> = for<'a> fn(&'a R) -> Cow<'a, str>;

fn prefix_spans<'a>(ctx: &RowContext<'_>, glyphs: &GlyphSet<'a>, spans: &mut Vec<Span<'a>>) {
    if ctx.depth == 0 {
        return;
    }
    if !ctx.draw_lines {
        for _ in 0..ctx.depth {
            spans.push(Span::raw(glyphs.empty));
        }
        return;
    }

    let last_level = ctx.is_tail_stack.len().saturating_sub(1);
    for (level, is_last) in ctx.is_tail_stack.iter().enumerate() {
        let part = if level == last_level {
            if *is_last {
                glyphs.branch_last
            } else {
                glyphs.branch
            }
        } else if ctx.is_tail_stack[level] {
            glyphs.indent
        } else {
            glyphs.vert
        };
        spans.push(Span::styled(part, ctx.line_style));
    }
}

pub fn branch_label_line<'a>(
    ctx: &RowContext<'_>,
    key: Cow<'a, str>,
    record_count: usize,
    is_expanded: bool,
    glyphs: &GlyphSet<'a>,
) -> Line<'a> {
    let mut spans = Vec::with_capacity(ctx.is_tail_stack.len() + 4);
    prefix_spans(ctx, glyphs, &mut spans);
    spans.push(Span::raw(if is_expanded {
        glyphs.expanded
    } else {
        glyphs.collapsed
    }));
    spans.push(Span::raw(" "));
    spans.push(Span::raw(key));
    spans.push(Span::raw(format!(" ({record_count})")));
    Line::from(spans)
}

pub fn leaf_label_line<'a>(
    ctx: &RowContext<'_>,
    label: Cow<'a, str>,
    glyphs: &GlyphSet<'a>,
) -> Line<'a> {
    let mut spans = Vec::with_capacity(ctx.is_tail_stack.len() + 3);
    prefix_spans(ctx, glyphs, &mut spans);
    spans.push(Span::raw(if ctx.is_selected {
        glyphs.selected
    } else {
        glyphs.unselected
    }));
    spans.push(Span::raw(" "));
    spans.push(Span::raw(label));
    Line::from(spans)
}
