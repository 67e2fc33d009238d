use rsiwatch_core::view::DisplayRegion;

const STYLE: &str = "body{font-family:sans-serif;width:320px}\
.recommendation{margin:6px 0;padding:6px}\
.border{border:1px solid #ccc;border-radius:4px}\
.buy{background:#e6f4ea}\
.sell{background:#fce8e6}\
.hold{background:#fef7e0}\
.unrated{background:#f1f3f4}\
h3{margin:0 0 4px 0;font-size:14px}\
p{margin:2px 0;font-size:12px}";

/// Standalone popup document with the region mounted at `#result`.
pub fn render_page(region: &DisplayRegion) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Stock Recommendations</title>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n<h2>Stock Recommendations</h2>\n\
         <div id=\"result\">{}</div>\n</body>\n</html>\n",
        region.to_html()
    )
}
