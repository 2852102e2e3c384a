//! Server-side HTML rendering.
//!
//! [`render_list`] rebuilds the whole dinosaur list from a snapshot on
//! every call; there is no diffing against the previous output. All
//! record text is HTML-escaped and identifiers in form actions are
//! percent-encoded as single path segments.

use std::fmt::Write;

use dinodex_core::model::{Dinosaur, Feature};
use dinodex_store::api::path_segment;

/// Render the list of dinosaur cards.
pub fn render_list(entities: &[Dinosaur]) -> String {
    let mut html = String::from("<div id=\"dinoApp\">\n");
    for dinosaur in entities {
        render_card(&mut html, dinosaur);
    }
    html.push_str("</div>\n");
    html
}

fn render_card(html: &mut String, dinosaur: &Dinosaur) {
    let id = escape(&dinosaur.id);
    let seg = escape(&path_segment(&dinosaur.id));

    let _ = write!(
        html,
        r#"<div id="dino-{id}" class="card p-4 m-2">
  <div class="card-header">
    <h4>{name}</h4>
    <form method="post" action="/dinosaurs/{seg}/delete">
      <button type="submit" class="btn btn-danger">Delete Dinosaur</button>
    </form>
  </div>
  <ul class="list-group list-group-flush dinoInfo">
    <li class="list-group-item"><b>Size: </b> {size}</li>
    <li class="list-group-item"><b>Diet: </b> {diet}</li>
    <li class="list-group-item"><b>Environment: </b> {environment}</li>
"#,
        name = escape(&dinosaur.name),
        size = escape(&dinosaur.size),
        diet = escape(&dinosaur.diet),
        environment = escape(&dinosaur.environment),
    );

    for feature in &dinosaur.features {
        render_feature(html, &seg, feature);
    }

    let _ = write!(
        html,
        r#"  </ul>
  <div class="card-body">
    <form method="post" action="/dinosaurs/{seg}/features">
      <input type="text" name="part" id="{id}-feature-part" class="form-control" placeholder="Dinosaur's Body Part">
      <input type="text" name="color" id="{id}-feature-color" class="form-control" placeholder="Dinosaur's Body Part Color">
      <button type="submit" id="{id}-new-feature" class="btn btn-primary form-control">Add Feature</button>
    </form>
  </div>
</div>
"#
    );
}

fn render_feature(html: &mut String, dinosaur_seg: &str, feature: &Feature) {
    let part = escape(&feature.part);
    let color = escape(&feature.color);

    match &feature.id {
        Some(feature_id) => {
            let _ = write!(
                html,
                r#"    <li class="list-group-item" id="feature-{fid}"><b>Body Part: </b> {part} <b>Color: </b> {color}
      <form method="post" action="/dinosaurs/{dinosaur_seg}/features/{fseg}/delete">
        <button type="submit" class="btn btn-danger">Delete Feature</button>
      </form>
    </li>
"#,
                fid = escape(feature_id),
                fseg = escape(&path_segment(feature_id)),
            );
        }
        // No stored id to target, so no delete control.
        None => {
            let _ = writeln!(
                html,
                r#"    <li class="list-group-item"><b>Body Part: </b> {part} <b>Color: </b> {color}</li>"#
            );
        }
    }
}

/// Render the full page: create form, optional error notice, list.
pub fn render_page(list_html: &str, notice: Option<&str>) -> String {
    let notice_html = match notice {
        Some(message) => format!(
            "<div class=\"alert alert-danger\" role=\"alert\">{}</div>\n",
            escape(message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Dinosaurs</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
</head>
<body class="container">
<h1>Dinosaurs</h1>
<form method="post" action="/dinosaurs" class="card p-4 m-2">
  <input type="text" name="name" id="dinoName" class="form-control" placeholder="Name">
  <input type="text" name="size" id="dinoSize" class="form-control" placeholder="Size">
  <input type="text" name="diet" id="dinoDiet" class="form-control" placeholder="Diet">
  <input type="text" name="environment" id="dinoEnvironment" class="form-control" placeholder="Environment">
  <button type="submit" id="addDino" class="btn btn-primary form-control">Add Dinosaur</button>
</form>
{notice_html}{list_html}</body>
</html>
"#
    )
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
