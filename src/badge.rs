//! SVG badge rendering.
//!
//! A pure transform from (label, value, options) to a self-contained
//! SVG document. Unknown theme/style/color/icon names degrade to
//! defaults; the renderer has no failure path.

use crate::models::BadgeOptions;

/// Colors for one theme. `value_bg` may be swapped for a palette color
/// at render time; everything else is fixed per theme.
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub label_bg: &'static str,
    pub value_bg: &'static str,
    pub text_color: &'static str,
    pub border_color: &'static str,
}

/// Geometry and typography for one badge style.
#[derive(Debug, Clone, Copy)]
pub struct StyleConfig {
    pub corner_radius: u32,
    pub height: u32,
    pub has_border: bool,
    pub has_shadow: bool,
    pub font_size: Option<&'static str>,
    pub text_transform: Option<&'static str>,
    pub letter_spacing: Option<&'static str>,
}

const DEFAULT_THEME: ThemeColors = ThemeColors {
    label_bg: "#555",
    value_bg: "#007ec6",
    text_color: "#fff",
    border_color: "none",
};

const DARK_THEME: ThemeColors = ThemeColors {
    label_bg: "#21262d",
    value_bg: "#238636",
    text_color: "#f0f6fc",
    border_color: "#30363d",
};

fn theme_colors(name: &str) -> ThemeColors {
    match name {
        "dark" | "github-dark" => DARK_THEME,
        "dracula" => ThemeColors {
            label_bg: "#44475a",
            value_bg: "#bd93f9",
            text_color: "#f8f8f2",
            border_color: "#6272a4",
        },
        "monokai" => ThemeColors {
            label_bg: "#272822",
            value_bg: "#a6e22e",
            text_color: "#f8f8f2",
            border_color: "#75715e",
        },
        "gradient" => ThemeColors {
            label_bg: "url(#grad1)",
            value_bg: "url(#grad2)",
            text_color: "#fff",
            border_color: "none",
        },
        "ocean" => ThemeColors {
            label_bg: "#0f4c75",
            value_bg: "#3282b8",
            text_color: "#bbe1fa",
            border_color: "#0f3460",
        },
        "sunset" => ThemeColors {
            label_bg: "#ff6b6b",
            value_bg: "#ffa726",
            text_color: "#fff",
            border_color: "#ff5722",
        },
        "neon" => ThemeColors {
            label_bg: "#0a0a0a",
            value_bg: "#00ff41",
            text_color: "#00ff41",
            border_color: "#00ff41",
        },
        _ => DEFAULT_THEME,
    }
}

fn palette_color(name: &str) -> Option<&'static str> {
    match name {
        "red" => Some("#e53e3e"),
        "green" => Some("#38a169"),
        "blue" => Some("#3182ce"),
        "yellow" => Some("#d69e2e"),
        "purple" => Some("#805ad5"),
        "pink" => Some("#d53f8c"),
        "orange" => Some("#dd6b20"),
        "teal" => Some("#319795"),
        "cyan" => Some("#0bc5ea"),
        "gray" => Some("#718096"),
        _ => None,
    }
}

const FLAT_STYLE: StyleConfig = StyleConfig {
    corner_radius: 3,
    height: 20,
    has_border: false,
    has_shadow: false,
    font_size: None,
    text_transform: None,
    letter_spacing: None,
};

fn style_config(name: &str) -> StyleConfig {
    match name {
        "flat-square" => StyleConfig {
            corner_radius: 0,
            ..FLAT_STYLE
        },
        "plastic" => StyleConfig {
            corner_radius: 4,
            height: 18,
            has_border: true,
            has_shadow: true,
            ..FLAT_STYLE
        },
        "for-the-badge" => StyleConfig {
            corner_radius: 0,
            height: 28,
            font_size: Some("11"),
            text_transform: Some("uppercase"),
            letter_spacing: Some("1px"),
            ..FLAT_STYLE
        },
        _ => FLAT_STYLE,
    }
}

fn icon_glyph(name: &str) -> &'static str {
    match name {
        "fire" => "\u{1f525}",
        "star" => "\u{2b50}",
        "rocket" => "\u{1f680}",
        "code" => "\u{1f4bb}",
        "chart" => "\u{1f4c8}",
        "commit" => "\u{1f4dd}",
        "calendar" => "\u{1f4c5}",
        "trophy" => "\u{1f3c6}",
        _ => "",
    }
}

const GRADIENT_DEFS: &str = r##"<defs>
    <linearGradient id="grad1" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" style="stop-color:#667eea;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#764ba2;stop-opacity:1" />
    </linearGradient>
    <linearGradient id="grad2" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" style="stop-color:#f093fb;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#f5576c;stop-opacity:1" />
    </linearGradient>
  </defs>"##;

const PULSE_STYLE: &str = "<style>\
.pulse { animation: pulse 2s infinite; }\
@keyframes pulse { 0% { opacity: 1; } 50% { opacity: 0.7; } 100% { opacity: 1; } }\
</style>";

const GLOW_STYLE: &str = "<style>\
.glow { animation: glow 2s ease-in-out infinite alternate; filter: drop-shadow(0 0 4px currentColor); }\
@keyframes glow { from { filter: drop-shadow(0 0 2px currentColor); } to { filter: drop-shadow(0 0 8px currentColor); } }\
</style>";

const SLIDE_STYLE: &str = "<style>\
.slide { animation: slide 3s ease-in-out infinite; }\
@keyframes slide { 0%, 100% { transform: translateX(0); } 50% { transform: translateX(2px); } }\
</style>";

/// Any non-empty value animates; names outside the known set behave as
/// slide. The returned name doubles as the element class so the emitted
/// keyframes always apply.
fn resolve_animation(animated: Option<&str>) -> Option<&'static str> {
    match animated {
        None | Some("") => None,
        Some("pulse") => Some("pulse"),
        Some("glow") => Some("glow"),
        Some(_) => Some("slide"),
    }
}

fn animation_style(name: &str) -> &'static str {
    match name {
        "pulse" => PULSE_STYLE,
        "glow" => GLOW_STYLE,
        _ => SLIDE_STYLE,
    }
}

/// Polyline normalized into the value panel. Empty for fewer than two
/// points; an all-equal series maps to a flat line via a unit range.
fn sparkline_polyline(data: &[u64], width: f64, height: f64) -> String {
    if data.len() < 2 {
        return String::new();
    }

    let max = data.iter().copied().max().unwrap_or(0) as f64;
    let min = data.iter().copied().min().unwrap_or(0) as f64;
    let range = if max > min { max - min } else { 1.0 };
    let last = (data.len() - 1) as f64;

    let points: Vec<String> = data
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = i as f64 / last * width;
            let y = height - (value as f64 - min) / range * height;
            format!("{},{}", fmt_num(x), fmt_num(y))
        })
        .collect();

    format!(
        r#"<polyline points="{}" fill="none" stroke="currentColor" stroke-width="1.5" opacity="0.6"/>"#,
        points.join(" ")
    )
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Formats a coordinate without trailing zeros, rounded to 2 decimals.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

/// Renders the badge SVG. Total over every option combination.
pub fn render(label: &str, value: &str, options: &BadgeOptions) -> String {
    let mut theme = theme_colors(options.theme.as_deref().unwrap_or("default"));
    if let Some(color) = options
        .color
        .as_deref()
        .and_then(palette_color)
    {
        theme.value_bg = color;
    }
    let style = style_config(options.style.as_deref().unwrap_or("flat"));
    let icon = icon_glyph(options.icon.as_deref().unwrap_or(""));

    let label_text = if icon.is_empty() {
        format!("Daily Commits ({label})")
    } else {
        format!("{icon} Daily Commits ({label})")
    };
    let value_text = value;

    let char_width = if style.font_size == Some("11") { 8.5 } else { 7.5 };
    let label_width = (label_text.chars().count() as f64 * char_width).max(80.0);
    let value_width = (value_text.chars().count() as f64 * (char_width + 1.0) + 20.0).max(50.0);
    let total_width = label_width + value_width;
    let height = f64::from(style.height);

    let gradients = if options.theme.as_deref() == Some("gradient") {
        GRADIENT_DEFS
    } else {
        ""
    };
    let animation = resolve_animation(options.animated.as_deref());
    let animation_block = animation.map(animation_style).unwrap_or("");
    let class_attr = animation
        .map(|name| format!(r#" class="{name}""#))
        .unwrap_or_default();

    let border_attr = if options.show_border || theme.border_color != "none" {
        format!(r#" stroke="{}" stroke-width="1""#, theme.border_color)
    } else {
        String::new()
    };

    let shadow_overlay = if style.has_shadow {
        format!(
            r#"<rect width="{}" height="{}" fill="url(#s)"/>"#,
            fmt_num(total_width),
            style.height
        )
    } else {
        String::new()
    };

    let sparkline_group = options
        .sparkline
        .as_deref()
        .map(|data| sparkline_polyline(data, value_width - 10.0, height - 8.0))
        .filter(|polyline| !polyline.is_empty())
        .map(|polyline| {
            format!(
                r#"<g transform="translate({}, 4)" color="{}">{}</g>"#,
                fmt_num(label_width + 5.0),
                theme.text_color,
                polyline
            )
        })
        .unwrap_or_default();

    let font_family = if style.font_size == Some("11") {
        "Trebuchet MS,sans-serif"
    } else {
        "Verdana,Geneva,DejaVu Sans,sans-serif"
    };
    let font_size = style.font_size.unwrap_or("110");
    let text_style_attr = style
        .text_transform
        .map(|transform| {
            format!(
                r#" style="text-transform: {}; letter-spacing: {}""#,
                transform,
                style.letter_spacing.unwrap_or("0")
            )
        })
        .unwrap_or_default();

    let label_esc = escape_xml(&label_text);
    let value_esc = escape_xml(value_text);
    let label_x = fmt_num(label_width * 5.0);
    let label_len = fmt_num((label_width - 10.0) * 10.0);
    let value_x = fmt_num((label_width + value_width / 2.0) * 10.0);
    let value_len = fmt_num((value_width - 10.0) * 10.0);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="{height}" role="img" aria-label="{label_esc}: {value_esc}">
  <title>{label_esc}: {value_esc}</title>
  {gradients}{animation_block}
  <linearGradient id="s" x2="0" y2="100%">
    <stop offset="0" stop-color="#bbb" stop-opacity=".1"/>
    <stop offset="1" stop-opacity=".1"/>
  </linearGradient>
  <clipPath id="r">
    <rect width="{total_width}" height="{height}" rx="{corner_radius}" fill="#fff"/>
  </clipPath>
  <g clip-path="url(#r)">
    <rect width="{label_width}" height="{height}" fill="{label_bg}"{border_attr}/>
    <rect x="{label_width}" width="{value_width}" height="{height}" fill="{value_bg}"{border_attr}/>
    {shadow_overlay}
  </g>
  {sparkline_group}
  <g fill="{text_color}" text-anchor="middle" font-family="{font_family}" text-rendering="geometricPrecision" font-size="{font_size}"{text_style_attr}{class_attr}>
    <text aria-hidden="true" x="{label_x}" y="150" fill="#010101" fill-opacity=".3" transform="scale(.1)" textLength="{label_len}">{label_esc}</text>
    <text x="{label_x}" y="140" transform="scale(.1)" fill="{text_color}" textLength="{label_len}">{label_esc}</text>
    <text aria-hidden="true" x="{value_x}" y="150" fill="#010101" fill-opacity=".3" transform="scale(.1)" textLength="{value_len}">{value_esc}</text>
    <text x="{value_x}" y="140" transform="scale(.1)" fill="{text_color}" textLength="{value_len}">{value_esc}</text>
  </g>
</svg>
"##,
        total_width = fmt_num(total_width),
        height = style.height,
        corner_radius = style.corner_radius,
        label_width = fmt_num(label_width),
        value_width = fmt_num(value_width),
        label_bg = theme.label_bg,
        value_bg = theme.value_bg,
        text_color = theme.text_color,
    )
}

/// Error badges are ordinary badges labeled "error"; the output shape
/// stays a valid image on every failure path.
pub fn render_error(message: &str, options: &BadgeOptions) -> String {
    render("error", message, options)
}
