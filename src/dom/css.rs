//! Lightweight inline CSS handling.
//!
//! Parses and rewrites `style=""` declarations, reads the few length values
//! the layout pass needs, and renders `@keyframes` blocks for generated
//! animations.

use std::fmt;

/// Ordered list of inline style declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    decls: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parse an inline `style="..."` attribute value.
    pub fn parse(style: &str) -> Self {
        let mut out = Self::default();
        for decl in style.split(';') {
            let Some((prop, val)) = decl.split_once(':') else {
                continue;
            };
            let prop = prop.trim();
            let val = val.trim();
            if prop.is_empty() || val.is_empty() {
                continue;
            }
            out.set(prop, val);
        }
        out
    }

    pub fn get(&self, prop: &str) -> Option<&str> {
        let prop = prop.to_lowercase();
        self.decls
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Set `prop`. An empty value removes the declaration, as assigning `''`
    /// through the style object does in a browser.
    pub fn set(&mut self, prop: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.remove(prop);
            return;
        }
        let prop = prop.to_lowercase();
        match self.decls.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.decls.push((prop, value)),
        }
    }

    pub fn remove(&mut self, prop: &str) -> Option<String> {
        let prop = prop.to_lowercase();
        let idx = self.decls.iter().position(|(p, _)| *p == prop)?;
        Some(self.decls.remove(idx).1)
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decls.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Numeric `opacity`, if set and parseable.
    pub fn opacity(&self) -> Option<f32> {
        self.get("opacity")?.trim().parse().ok()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (p, v)) in self.decls.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", p, v)?;
        }
        Ok(())
    }
}

/// Parse a CSS pixel length (`12px`, `-100px`, `0`, plain numbers).
pub fn parse_css_px(val: &str) -> Option<f32> {
    let v = val.trim().to_lowercase();
    v.trim_end_matches("px").trim().parse::<f32>().ok()
}

/// Parse a CSS length that may use `vh` units relative to `viewport_height`.
pub fn parse_css_length(val: &str, viewport_height: f32) -> Option<f32> {
    let v = val.trim().to_lowercase();
    if let Some(num) = v.strip_suffix("vh") {
        return num.trim().parse::<f32>().ok().map(|n| n * viewport_height / 100.0);
    }
    parse_css_px(&v)
}

/// A two-stop `@keyframes` rule animating `transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    pub name: String,
    pub from: String,
    pub to: String,
}

impl Keyframes {
    pub fn to_css(&self) -> String {
        format!(
            "@keyframes {} {{\n    from {{\n        transform: {};\n    }}\n    to {{\n        transform: {};\n    }}\n}}\n",
            self.name, self.from, self.to
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_inline() {
        let style = InlineStyle::parse("opacity: 0; transform: translateX(-50px);  ; bogus");
        assert_eq!(style.get("opacity"), Some("0"));
        assert_eq!(style.get("transform"), Some("translateX(-50px)"));
        assert_eq!(style.iter().count(), 2);
        assert_eq!(style.opacity(), Some(0.0));
    }

    #[test]
    fn empty_value_removes_declaration() {
        let mut style = InlineStyle::parse("overflow: hidden");
        style.set("overflow", "");
        assert!(style.is_empty());
    }

    #[test]
    fn property_names_ignore_case() {
        let mut style = InlineStyle::default();
        style.set("Opacity", "0");
        style.set("OPACITY", "1");
        assert_eq!(style.iter().count(), 1);
        assert_eq!(style.get("opacity"), Some("1"));
        assert_eq!(style.get("Opacity"), Some("1"));
        assert_eq!(style.remove("OpAcItY"), Some("1".to_string()));
        assert!(style.is_empty());
    }

    #[test]
    fn set_replaces_in_place() {
        let mut style = InlineStyle::parse("a: 1; b: 2");
        style.set("a", "3");
        assert_eq!(style.to_string(), "a: 3; b: 2;");
    }

    #[test]
    fn lengths() {
        assert_eq!(parse_css_px("-100px"), Some(-100.0));
        assert_eq!(parse_css_px("0"), Some(0.0));
        assert_eq!(parse_css_px("auto"), None);
        assert_eq!(parse_css_length("100vh", 800.0), Some(800.0));
        assert_eq!(parse_css_length("50vh", 800.0), Some(400.0));
    }

    #[test]
    fn keyframes_render_both_stops() {
        let kf = Keyframes {
            name: "orbit0".into(),
            from: "rotate(10deg)".into(),
            to: "rotate(370deg)".into(),
        };
        let css = kf.to_css();
        assert!(css.starts_with("@keyframes orbit0 {"));
        assert!(css.contains("transform: rotate(10deg);"));
        assert!(css.contains("transform: rotate(370deg);"));
    }
}
