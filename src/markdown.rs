use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    ListItem,
    Quote,
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub runs: Vec<Run>,
}

impl Block {
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct InlineState {
    strong_depth: u8,
    emphasis_depth: u8,
}

fn heading_level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Flattens a bio document into blocks separated by `Blank` entries.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut active: Option<Block> = None;
    let mut inline = InlineState::default();
    let mut quote_depth = 0u8;

    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Paragraph) => {
                // List items and quotes already opened their own block.
                if active.is_none() {
                    let kind = if quote_depth > 0 {
                        BlockKind::Quote
                    } else {
                        BlockKind::Paragraph
                    };
                    active = Some(Block {
                        kind,
                        runs: Vec::new(),
                    });
                }
            }
            Event::Start(Tag::Heading { level, .. }) => {
                finish(&mut active, &mut blocks);
                active = Some(Block {
                    kind: BlockKind::Heading(heading_level_number(level)),
                    runs: Vec::new(),
                });
            }
            Event::Start(Tag::BlockQuote(_)) => {
                finish(&mut active, &mut blocks);
                quote_depth = quote_depth.saturating_add(1);
            }
            Event::Start(Tag::Item) => {
                finish(&mut active, &mut blocks);
                active = Some(Block {
                    kind: BlockKind::ListItem,
                    runs: Vec::new(),
                });
            }
            Event::Start(Tag::Strong) => inline.strong_depth += 1,
            Event::Start(Tag::Emphasis) => inline.emphasis_depth += 1,
            Event::End(TagEnd::Strong) => inline.strong_depth = inline.strong_depth.saturating_sub(1),
            Event::End(TagEnd::Emphasis) => {
                inline.emphasis_depth = inline.emphasis_depth.saturating_sub(1)
            }
            Event::End(TagEnd::Paragraph) => {
                if !matches!(active.as_ref().map(|b| b.kind), Some(BlockKind::ListItem)) {
                    finish(&mut active, &mut blocks);
                }
            }
            Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock) => {
                finish(&mut active, &mut blocks);
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                finish(&mut active, &mut blocks);
                quote_depth = quote_depth.saturating_sub(1);
            }
            Event::Text(text) | Event::Code(text) => {
                let block = active.get_or_insert_with(|| Block {
                    kind: BlockKind::Paragraph,
                    runs: Vec::new(),
                });
                push_run(block, &text, inline);
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(block) = active.as_mut() {
                    push_run(block, " ", inline);
                }
            }
            _ => {}
        }
    }
    finish(&mut active, &mut blocks);
    blocks
}

fn finish(active: &mut Option<Block>, blocks: &mut Vec<Block>) {
    let Some(block) = active.take() else {
        return;
    };
    if block.runs.is_empty() {
        return;
    }
    if !blocks.is_empty() {
        blocks.push(Block {
            kind: BlockKind::Blank,
            runs: Vec::new(),
        });
    }
    blocks.push(block);
}

fn push_run(block: &mut Block, text: &str, inline: InlineState) {
    let strong = inline.strong_depth > 0;
    let emphasis = inline.emphasis_depth > 0;
    if let Some(last) = block.runs.last_mut()
        && last.strong == strong
        && last.emphasis == emphasis
    {
        last.text.push_str(text);
        return;
    }
    block.runs.push(Run {
        text: text.to_string(),
        strong,
        emphasis,
    });
}

#[cfg(test)]
mod tests {
    use super::{BlockKind, parse_blocks};

    #[test]
    fn headings_lists_and_quotes() {
        let blocks = parse_blocks("# Career\n\nA **fast** back.\n\n- one\n- two\n\n> quoted");
        let kinds: Vec<BlockKind> = blocks
            .iter()
            .map(|b| b.kind)
            .filter(|k| *k != BlockKind::Blank)
            .collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading(1),
                BlockKind::Paragraph,
                BlockKind::ListItem,
                BlockKind::ListItem,
                BlockKind::Quote,
            ]
        );
        let para = blocks
            .iter()
            .find(|b| b.kind == BlockKind::Paragraph)
            .expect("paragraph");
        assert_eq!(para.plain_text(), "A fast back.");
        assert!(para.runs.iter().any(|r| r.strong && r.text == "fast"));
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(parse_blocks("").is_empty());
    }
}
