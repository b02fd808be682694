//! Example: Scan an HTML page and clean its paragraphs
//!
//! Run with: cargo run -p cleankit --example clean_page
//!
//! Shows each stage of the pipeline on an embedded page, no network needed.

use cleankit::{
    clean, extract_page, is_boilerplate, looks_like_content, raw_document, word_count,
    CleanConfig,
};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Tide Tables Explained</title></head>
<body>
<p>Menu</p>
<p>Tides rise and fall twice a day because of the gravitational pull of the moon.</p>
<p>Spring tides happen near new and full moons, when the sun and moon line up.</p>
<p>Tides rise and fall twice a day because of the gravitational pull of the moon.</p>
<p>Sign up for our newsletter and never miss another article about the ocean!</p>
<p>&copy; 2024 Coastal Notes. All rights reserved.</p>
</body>
</html>"#;

fn main() {
    let page = extract_page(PAGE);
    let config = CleanConfig::default();

    println!("Title: {}", page.title);
    println!("Paragraphs: {}\n", page.paragraphs.len());

    for paragraph in &page.paragraphs {
        let verdict = if !looks_like_content(paragraph, &config) {
            "not content"
        } else if is_boilerplate(paragraph, &config) {
            "boilerplate"
        } else {
            "kept"
        };
        println!("[{:>11}] {}", verdict, paragraph);
    }

    let cleaned = clean(&raw_document(&page));
    println!("\n--- cleaned ({} words) ---\n{}", word_count(&cleaned), cleaned);
}
