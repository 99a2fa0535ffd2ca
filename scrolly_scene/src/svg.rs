// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export for debugging and inspection.

use alloc::format;
use alloc::string::String;
use core::fmt::Write as _;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Affine, BezPath, PathEl};
use peniko::Color;

use crate::node::{Node, Scene};

/// Renders a scene as a standalone SVG document.
///
/// Pinned groups are marked with `data-pinned="true"`; placing them relative
/// to the viewport is up to whoever displays the document. Captions become
/// `<text>` elements with no font styling.
#[must_use]
pub fn to_svg(scene: &Scene) -> String {
    let size = scene.size();
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = fmt_num(size.width),
        h = fmt_num(size.height),
    );
    for node in scene.nodes() {
        write_node(&mut out, node);
    }
    out.push_str("</svg>");
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Group(g) => {
            out.push_str("<g");
            if g.transform != Affine::IDENTITY {
                let _ = write!(out, " transform=\"{}\"", affine_to_svg_matrix(g.transform));
            }
            write_opacity(out, "opacity", g.opacity);
            write_class(out, g.class.as_deref());
            if g.pinned {
                out.push_str(" data-pinned=\"true\"");
            }
            out.push('>');
            for child in &g.children {
                write_node(out, child);
            }
            out.push_str("</g>");
        }
        Node::Path(p) => {
            let _ = write!(out, "<path d=\"{}\"", bez_path_to_svg_d(&p.path));
            write_fill(out, p.fill);
            write_opacity(out, "opacity", p.opacity);
            write_class(out, p.class.as_deref());
            out.push_str("/>");
        }
        Node::Rect(r) => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                fmt_num(r.rect.x0),
                fmt_num(r.rect.y0),
                fmt_num(r.rect.width()),
                fmt_num(r.rect.height()),
            );
            write_fill(out, r.fill);
            write_opacity(out, "opacity", r.opacity);
            write_class(out, r.class.as_deref());
            out.push_str("/>");
        }
        Node::Caption(c) => {
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\"",
                fmt_num(c.origin.x),
                fmt_num(c.origin.y)
            );
            write_opacity(out, "opacity", c.opacity);
            write_class(out, Some(&c.class));
            out.push('>');
            escape_into(out, &c.text);
            out.push_str("</text>");
        }
    }
}

fn write_fill(out: &mut String, color: Color) {
    let rgba = color.to_rgba8();
    let _ = write!(out, " fill=\"#{:02x}{:02x}{:02x}\"", rgba.r, rgba.g, rgba.b);
    if rgba.a != 255 {
        write_opacity(out, "fill-opacity", f64::from(rgba.a) / 255.0);
    }
}

fn write_opacity(out: &mut String, attr: &str, opacity: f64) {
    if opacity < 1.0 {
        let _ = write!(out, " {attr}=\"{}\"", fmt_num(opacity.max(0.0)));
    }
}

fn write_class(out: &mut String, class: Option<&str>) {
    if let Some(class) = class {
        out.push_str(" class=\"");
        escape_into(out, class);
        out.push('"');
    }
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

fn affine_to_svg_matrix(xf: Affine) -> String {
    let c = xf.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        fmt_num(c[0]),
        fmt_num(c[1]),
        fmt_num(c[2]),
        fmt_num(c[3]),
        fmt_num(c[4]),
        fmt_num(c[5]),
    )
}

fn bez_path_to_svg_d(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.iter() {
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{} {}", fmt_num(p.x), fmt_num(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{} {}", fmt_num(p.x), fmt_num(p.y));
            }
            PathEl::QuadTo(p1, p2) => {
                let _ = write!(
                    d,
                    "Q{} {} {} {}",
                    fmt_num(p1.x),
                    fmt_num(p1.y),
                    fmt_num(p2.x),
                    fmt_num(p2.y)
                );
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {}",
                    fmt_num(p1.x),
                    fmt_num(p1.y),
                    fmt_num(p2.x),
                    fmt_num(p2.y),
                    fmt_num(p3.x),
                    fmt_num(p3.y)
                );
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    // Whole numbers print without a fractional part.
    if (v - v.round()).abs() < 1e-6 && v.abs() < 1e15 {
        return format!("{}", v.round() + 0.0);
    }
    let mut s = format!("{v:.3}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}
