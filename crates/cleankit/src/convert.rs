//! HTML paragraph extraction

/// Elements whose text never reaches the output
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "svg", "template"];

/// Title and paragraph blocks scanned from an HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Text of the first `<title>` element, trimmed
    pub title: String,
    /// Text of each non-empty `<p>` element, in document order
    pub paragraphs: Vec<String>,
}

/// Check if content is HTML based on content type and body
pub fn is_html(content_type: &Option<String>, body: &str) -> bool {
    if let Some(ct) = content_type {
        let ct_lower = ct.to_lowercase();
        if ct_lower.contains("text/html") || ct_lower.contains("application/xhtml") {
            return true;
        }
    }

    let trimmed = body.trim_start();
    let head: String = trimmed.chars().take(15).collect::<String>().to_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// Scan HTML for the page title and paragraph text
///
/// Nested inline markup inside a paragraph contributes its text, and tags
/// themselves (including `<br>`) add no separator. Source line breaks inside
/// a paragraph are kept, only the ends are trimmed. Never fails: an
/// unterminated tag simply ends the scan.
pub fn extract_page(html: &str) -> Page {
    let mut page = Page::default();
    let mut skip_elements: Vec<String> = Vec::new();
    let mut title: Option<String> = None;
    let mut title_done = false;
    let mut paragraph: Option<String> = None;

    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' {
            let mut tag = String::new();
            for next in chars.by_ref() {
                if next == '>' {
                    break;
                }
                tag.push(next);
            }

            // Comments and doctype
            if tag.starts_with('!') || tag.starts_with('?') {
                continue;
            }

            let tag_lower = tag.to_lowercase();
            let is_closing = tag_lower.starts_with('/');
            let tag_name = tag_lower
                .trim_start_matches('/')
                .split(|ch: char| ch.is_whitespace() || ch == '/')
                .next()
                .unwrap_or("");

            if SKIP_TAGS.contains(&tag_name) {
                if is_closing {
                    if let Some(pos) = skip_elements.iter().rposition(|t| t == tag_name) {
                        skip_elements.truncate(pos);
                    }
                } else if !tag.ends_with('/') {
                    skip_elements.push(tag_name.to_string());
                }
                continue;
            }

            if !skip_elements.is_empty() {
                continue;
            }

            match tag_name {
                "title" => {
                    if is_closing {
                        if let Some(text) = title.take() {
                            page.title = text.trim().to_string();
                            title_done = true;
                        }
                    } else if !title_done {
                        title = Some(String::new());
                    }
                }
                "p" => {
                    // An open paragraph is implicitly closed by the next one
                    if let Some(text) = paragraph.take() {
                        push_paragraph(&mut page.paragraphs, &text);
                    }
                    if !is_closing {
                        paragraph = Some(String::new());
                    }
                }
                _ => {}
            }
        } else if skip_elements.is_empty() {
            let decoded = decode_entity(c, &mut chars);
            if let Some(ref mut text) = title {
                text.push(decoded);
            }
            if let Some(ref mut text) = paragraph {
                text.push(decoded);
            }
        }
    }

    if let Some(text) = paragraph {
        push_paragraph(&mut page.paragraphs, &text);
    }
    if let Some(text) = title {
        if !title_done {
            page.title = text.trim().to_string();
        }
    }

    page
}

/// Join paragraphs into the raw line-separated document the cleaner consumes
pub fn raw_document(page: &Page) -> String {
    page.paragraphs.join("\n")
}

fn push_paragraph(paragraphs: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        paragraphs.push(text.to_string());
    }
}

/// Decode HTML entity starting from ampersand
fn decode_entity(c: char, chars: &mut std::iter::Peekable<std::str::Chars>) -> char {
    if c != '&' {
        return c;
    }

    // Look ahead without consuming until we know it's an entity
    let lookahead: String = chars.clone().take(12).collect();
    let Some(end) = lookahead.find(';') else {
        return '&';
    };
    let entity = &lookahead[..end];
    if entity.is_empty() || entity.contains(|ch: char| ch.is_whitespace() || ch == '&') {
        return '&';
    }

    let decoded = match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "mdash" => Some('—'),
        "ndash" => Some('–'),
        "hellip" => Some('…'),
        "rsquo" => Some('\u{2019}'),
        "lsquo" => Some('\u{2018}'),
        "rdquo" => Some('\u{201d}'),
        "ldquo" => Some('\u{201c}'),
        "copy" => Some('©'),
        "reg" => Some('®'),
        _ => entity.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }),
    };

    match decoded {
        Some(ch) => {
            // Consume entity body and the semicolon
            for _ in 0..=entity.chars().count() {
                chars.next();
            }
            ch
        }
        None => '&',
    }
}
