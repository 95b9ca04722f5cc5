use crate::html::{escape_html, is_web_link};
use crate::review::{Persona, ReviewOutcome};
use crate::search::{MAX_RESULTS, MIN_RESULTS};
use crate::session::{ActionOutcome, PaperCard, SearchForm};

const PAGE_TITLE: &str = "Arxiv Multi-View Reviewer";

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; color: #1d1d1f; display: flex; min-height: 100vh; }
    aside { width: 18rem; background: #f0f2f6; padding: 1.5rem; box-sizing: border-box; }
    main { flex: 1; padding: 2rem 3rem; max-width: 80rem; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    input[type=text], input[type=password] { width: 100%; padding: 0.5rem; box-sizing: border-box; }
    input[type=range] { width: 80%; }
    button { margin-top: 1.25rem; padding: 0.6rem 1rem; background: #ff4b4b; color: #fff; border: 0; border-radius: 6px; cursor: pointer; }
    .note { padding: 0.75rem 1rem; border-radius: 6px; margin: 1rem 0; }
    .note.info { background: #e8f1fb; }
    .note.warning { background: #fff8e1; }
    .note.success { background: #e8f5e9; }
    .card { border-bottom: 1px solid #ddd; padding-bottom: 1.5rem; margin-bottom: 1.5rem; }
    .caption { color: #6b6b70; font-size: 0.9rem; }
    .columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
    .review { white-space: pre-wrap; padding: 0.75rem 1rem; border-radius: 6px; }
    .review.info { background: #e8f1fb; }
    .review.success { background: #e8f5e9; }
    .review.error { background: #fdecea; }
"#;

/// Render the full page: sidebar form plus whatever the last action produced.
pub fn page(form: &SearchForm, outcome: Option<&ActionOutcome>) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str(&format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{PAGE_TITLE}</title>
  <style>{STYLE}</style>
</head>
<body>
"#
    ));
    sidebar(&mut html, form);

    html.push_str(&format!(
        r#"<main>
  <h1>{PAGE_TITLE}</h1>
  <p>Search recent arXiv papers and read two AI reviews side by side: one from a data scientist's point of view and one written for newcomers.</p>
"#
    ));

    match outcome {
        None if !form.api_key.trim().is_empty() => {}
        None | Some(ActionOutcome::CredentialRequired) => {
            note(&mut html, "warning", "Enter your Gemini API key in the sidebar to start.");
        }
        Some(ActionOutcome::NotFound) => {
            note(
                &mut html,
                "warning",
                "No papers found. Try a different keyword.",
            );
        }
        Some(ActionOutcome::SearchFailed(reason)) => {
            note(
                &mut html,
                "warning",
                &format!("arXiv search failed: {reason}"),
            );
        }
        Some(ActionOutcome::Rendered(cards)) => {
            note(
                &mut html,
                "success",
                &format!("Found {} papers. Reviews below.", cards.len()),
            );
            for (i, card) in cards.iter().enumerate() {
                paper_card(&mut html, i + 1, card);
            }
        }
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn sidebar(html: &mut String, form: &SearchForm) {
    let max_papers = form.max_papers.clamp(MIN_RESULTS, MAX_RESULTS);
    html.push_str(&format!(
        r#"<aside>
  <form method="post" action="/analyze">
    <h2>Settings</h2>
    <label for="api_key">Gemini API Key</label>
    <input id="api_key" name="api_key" type="password" autocomplete="off" value="{api_key}" />
    <h2>Search Filter</h2>
    <label for="query">Keyword</label>
    <input id="query" name="query" type="text" value="{query}" />
    <label for="max_papers">Max Papers</label>
    <input id="max_papers" name="max_papers" type="range" min="{MIN_RESULTS}" max="{MAX_RESULTS}" value="{max_papers}" oninput="this.nextElementSibling.value = this.value" />
    <output>{max_papers}</output>
    <button type="submit">Search &amp; Analyze</button>
  </form>
  <p class="note info">Tip: try keywords like 'RAG', 'Time Series', 'Transformer'.</p>
</aside>
"#,
        api_key = escape_html(&form.api_key),
        query = escape_html(&form.query),
    ));
}

fn note(html: &mut String, kind: &str, message: &str) {
    html.push_str(&format!(
        "  <div class=\"note {kind}\">{}</div>\n",
        escape_html(message)
    ));
}

fn paper_card(html: &mut String, index: usize, card: &PaperCard) {
    let paper = &card.paper;
    let title = escape_html(&paper.title);
    let heading = if is_web_link(&paper.url) {
        format!(r#"<a href="{}">{title}</a>"#, escape_html(&paper.url))
    } else {
        title
    };

    html.push_str(&format!(
        r#"  <section class="card">
    <h3>{index}. {heading}</h3>
    <p class="caption">Authors: {authors} | Published: {published}</p>
    <details><summary>Show Original Abstract</summary><p>{summary}</p></details>
    <div class="columns">
"#,
        authors = escape_html(&paper.authors),
        published = paper.published.format("%Y-%m-%d"),
        summary = escape_html(&paper.summary),
    ));

    for persona in Persona::ALL {
        review_panel(html, persona, card.review(persona));
    }

    html.push_str("    </div>\n  </section>\n");
}

fn review_panel(html: &mut String, persona: Persona, outcome: &ReviewOutcome) {
    let tone = if outcome.is_failure() {
        "error"
    } else {
        match persona {
            Persona::Expert => "info",
            Persona::Beginner => "success",
        }
    };
    html.push_str(&format!(
        r#"      <div class="panel {persona}">
        <h4>{heading}</h4>
        <div class="review {tone}">{text}</div>
      </div>
"#,
        heading = persona.profile().heading,
        text = escape_html(&outcome.display_text()),
    ));
}
