use crate::models::{LocationReport, TagMap};

pub const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>geopeek</title></head>
<body>
<h1>geopeek</h1>
<p>Upload a photo to see its embedded metadata and where it was taken.</p>
<form action="/upload" method="post" enctype="multipart/form-data">
  <input type="file" name="file">
  <button type="submit">Inspect</button>
</form>
</body>
</html>
"#;

pub fn report_page(report: &LocationReport) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<h1>Metadata for {}</h1>\n",
        escape(&report.filename)
    ));

    if report.metadata.is_empty() {
        body.push_str("<p>No metadata found.</p>\n");
    } else {
        body.push_str("<h2>Tags</h2>\n");
        body.push_str(&tag_table(&report.metadata));
    }

    if let Some(gps) = &report.gps {
        body.push_str("<h2>GPS</h2>\n");
        body.push_str(&tag_table(gps));
    }

    match (report.latitude, report.longitude) {
        (Some(lat), Some(lon)) => {
            body.push_str(&format!("<p>Position: {lat}, {lon}</p>\n"));
        }
        (Some(lat), None) => body.push_str(&format!("<p>Latitude: {lat}</p>\n")),
        (None, Some(lon)) => body.push_str(&format!("<p>Longitude: {lon}</p>\n")),
        (None, None) => {}
    }

    if let Some(url) = &report.map_url {
        body.push_str(&format!(
            "<p><a href=\"{}\">Show on map</a></p>\n",
            escape(url)
        ));
    }

    body.push_str("<p><a href=\"/\">Inspect another photo</a></p>\n");

    page("Result", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Upload failed</h1>\n<p>{}</p>\n<p><a href=\"/\">Back</a></p>\n",
        escape(message)
    );
    page("Upload failed", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>geopeek - {}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn tag_table(tags: &TagMap) -> String {
    let mut table = String::from("<table>\n");

    for (name, value) in tags {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(name),
            escape(&value.to_string())
        ));
    }

    table.push_str("</table>\n");
    table
}

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
