//! C# source metadata reader.
//!
//! Extracts namespaces, type declarations, public instance properties and
//! method signatures with regular expressions. It understands the shapes ABP
//! solutions are written in (entities, DTOs, service interfaces) and is not
//! a general C# parser.

use once_cell::sync::Lazy;
use regex::Regex;

use super::models::{MethodInfo, ParameterInfo, PropertyInfo, TypeInfo, TypeKind};

static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*namespace\s+([\w.]+)").expect("valid namespace regex"));

static TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)(?:^|[{;])[ \t]*(?:\[[^\]\n]*\][ \t]*)*(?:(?:public|internal|protected|private|abstract|sealed|static|partial|readonly)\s+)*(?P<kind>record\s+(?:class|struct)|class|interface|enum|record|struct)\s+(?P<name>\w+)(?:\s*<[^>]*>)?(?:\s*\((?P<ctor>[^)]*)\))?(?:\s*:\s*(?P<bases>[^{;]+))?",
    )
    .expect("valid type regex")
});

static PROPERTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:\[[^\]\n]*\][ \t]*)*public\s+(?P<mods>(?:(?:virtual|override|new|static|required|abstract|sealed)\s+)*)(?P<type>[\w.]+(?:<[^{};=()]*?>)?(?:\[\])?\??)\s+(?P<name>\w+)\s*(?:\{|=>)",
    )
    .expect("valid property regex")
});

static INTERFACE_METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:\[[^\]\n]*\][ \t]*)*(?:public\s+)?(?P<ret>[\w.]+(?:<[^{};=()]*?>)?(?:\[\])?\??)\s+(?P<name>\w+)\s*(?:<[^>()]*>)?\s*\((?P<params>[^)]*)\)\s*;",
    )
    .expect("valid interface method regex")
});

static CLASS_METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:\[[^\]\n]*\][ \t]*)*public\s+(?P<mods>(?:(?:virtual|override|async|static|new|abstract|sealed)\s+)*)(?P<ret>[\w.]+(?:<[^{};=()]*?>)?(?:\[\])?\??)\s+(?P<name>\w+)\s*(?:<[^>()]*>)?\s*\((?P<params>[^)]*)\)",
    )
    .expect("valid class method regex")
});

const PARAMETER_MODIFIERS: &[&str] = &["this", "ref", "out", "in", "params", "scoped"];

/// Parse every type declared in `source`
pub fn parse_source(source: &str) -> Vec<TypeInfo> {
    let code = strip_comments(source);

    let namespaces: Vec<(usize, String)> = NAMESPACE_RE
        .captures_iter(&code)
        .filter_map(|c| Some((c.get(0)?.start(), c.get(1)?.as_str().to_string())))
        .collect();

    let mut types = Vec::new();
    for caps in TYPE_RE.captures_iter(&code) {
        let (Some(whole), Some(kind), Some(name)) = (caps.get(0), caps.name("kind"), caps.name("name"))
        else {
            continue;
        };

        let is_record = kind.as_str().starts_with("record");
        let kind = match kind.as_str() {
            "interface" => TypeKind::Interface,
            "enum" => TypeKind::Enum,
            _ => TypeKind::Class,
        };

        let namespace = namespaces
            .iter()
            .rev()
            .find(|(pos, _)| *pos < whole.start())
            .map(|(_, ns)| ns.clone())
            .unwrap_or_default();

        let base_types = caps
            .name("bases")
            .map(|b| {
                let bases = b.as_str();
                let bases = bases.split(" where ").next().unwrap_or(bases);
                split_top_level(bases, ',')
            })
            .unwrap_or_default();

        let body = body_after(&code, whole.end()).unwrap_or_default();

        let (mut properties, methods) = match kind {
            TypeKind::Enum => (Vec::new(), Vec::new()),
            TypeKind::Interface => (Vec::new(), interface_methods(&body)),
            TypeKind::Class => (class_properties(&body), class_methods(&body)),
        };

        // Positional record parameters are public properties, declared first
        if is_record {
            if let Some(ctor) = caps.name("ctor") {
                let positional: Vec<PropertyInfo> = split_top_level(ctor.as_str(), ',')
                    .iter()
                    .filter_map(|p| parse_parameter(p))
                    .map(|p| PropertyInfo::new(p.type_name, p.name))
                    .filter(|p| !properties.iter().any(|q| q.name == p.name))
                    .collect();
                let declared = std::mem::replace(&mut properties, positional);
                properties.extend(declared);
            }
        }

        types.push(TypeInfo {
            namespace,
            name: name.as_str().to_string(),
            kind,
            base_types,
            properties,
            methods,
        });
    }

    types
}

/// Find the type named `name` in `source`
pub fn find_type(source: &str, name: &str) -> Option<TypeInfo> {
    parse_source(source).into_iter().find(|t| t.name == name)
}

fn class_properties(body: &str) -> Vec<PropertyInfo> {
    PROPERTY_RE
        .captures_iter(body)
        .filter(|c| !c["mods"].contains("static"))
        .map(|c| PropertyInfo::new(normalize_type(&c["type"]), &c["name"]))
        .collect()
}

fn class_methods(body: &str) -> Vec<MethodInfo> {
    CLASS_METHOD_RE
        .captures_iter(body)
        .filter(|c| !c["mods"].contains("static"))
        .map(|c| method_from(&c["ret"], &c["name"], &c["params"]))
        .collect()
}

fn interface_methods(body: &str) -> Vec<MethodInfo> {
    INTERFACE_METHOD_RE
        .captures_iter(body)
        .map(|c| method_from(&c["ret"], &c["name"], &c["params"]))
        .collect()
}

fn method_from(return_type: &str, name: &str, params: &str) -> MethodInfo {
    let parameters = split_top_level(params, ',')
        .iter()
        .filter_map(|p| parse_parameter(p))
        .collect();
    MethodInfo::new(normalize_type(return_type), name, parameters)
}

/// Parse `[FromQuery] Type name = default` into a parameter
fn parse_parameter(raw: &str) -> Option<ParameterInfo> {
    let mut text = raw.trim();

    while text.starts_with('[') {
        let end = matching_close(text, 0, '[', ']')?;
        text = text[end + 1..].trim_start();
    }

    if let Some(eq) = find_top_level(text, '=') {
        text = text[..eq].trim_end();
    }

    loop {
        let Some((word, rest)) = text.split_once(char::is_whitespace) else {
            break;
        };
        if !PARAMETER_MODIFIERS.contains(&word) {
            break;
        }
        text = rest.trim_start();
    }

    let split = last_top_level_whitespace(text)?;
    let (type_name, name) = (text[..split].trim(), text[split..].trim());
    if type_name.is_empty() || name.is_empty() {
        return None;
    }

    Some(ParameterInfo::new(normalize_type(type_name), name))
}

/// Collapse whitespace inside generic type names
fn normalize_type(type_name: &str) -> String {
    let joined: Vec<&str> = type_name.split_whitespace().collect();
    joined.join(" ").replace(" <", "<").replace("< ", "<").replace(" >", ">")
}

/// Text between the `{` following `from` and its matching `}`, with nested
/// type declarations blanked out.
fn body_after(code: &str, from: usize) -> Option<String> {
    let rest = code.get(from..)?;
    let open_rel = rest.find(|c: char| c == '{' || c == ';')?;
    if rest.as_bytes()[open_rel] == b';' {
        return None;
    }
    let open = from + open_rel;
    let close = matching_close(code, open, '{', '}')?;
    let mut body = code[open + 1..close].to_string();

    let nested: Vec<(usize, usize)> = TYPE_RE
        .find_iter(&body)
        .filter_map(|m| {
            let inner_open = body[m.end()..].find('{')? + m.end();
            let inner_close = matching_close(&body, inner_open, '{', '}')?;
            Some((m.start(), inner_close + 1))
        })
        .collect();

    for (start, end) in nested.into_iter().rev() {
        body.replace_range(start..end, &" ".repeat(end - start));
    }

    Some(body)
}

/// Index of the bracket closing the one at `open`
fn matching_close(text: &str, open: usize, open_ch: char, close_ch: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text[open..].char_indices() {
        if ch == open_ch {
            depth += 1;
        } else if ch == close_ch {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(open + i);
            }
        }
    }
    None
}

/// Split on `sep` outside of `<>`, `()`, `[]` and `{}`
fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();

    for ch in text.chars() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            _ => {}
        }
        if ch == sep && depth == 0 {
            parts.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    parts.push(current.trim().to_string());

    parts.into_iter().filter(|p| !p.is_empty()).collect()
}

fn find_top_level(text: &str, target: char) -> Option<usize> {
    let mut depth = 0i32;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            c if c == target && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn last_top_level_whitespace(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut last = None;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            c if c.is_whitespace() && depth == 0 => last = Some(i),
            _ => {}
        }
    }
    last
}

/// Remove `//` and `/* */` comments, leaving string literals intact
fn strip_comments(source: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        Line,
        Block,
        Str,
        Verbatim,
        Char,
    }

    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            State::Code => match (ch, chars.peek()) {
                ('/', Some('/')) => {
                    chars.next();
                    state = State::Line;
                }
                ('/', Some('*')) => {
                    chars.next();
                    state = State::Block;
                }
                ('@', Some('"')) => {
                    out.push(ch);
                    out.extend(chars.next());
                    state = State::Verbatim;
                }
                ('"', _) => {
                    out.push(ch);
                    state = State::Str;
                }
                ('\'', _) => {
                    out.push(ch);
                    state = State::Char;
                }
                _ => out.push(ch),
            },
            State::Line => {
                if ch == '\n' {
                    out.push(ch);
                    state = State::Code;
                }
            }
            State::Block => {
                if ch == '\n' {
                    out.push(ch);
                } else if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::Verbatim => {
                out.push(ch);
                if ch == '"' {
                    if chars.peek() == Some(&'"') {
                        out.extend(chars.next());
                    } else {
                        state = State::Code;
                    }
                }
            }
            State::Str | State::Char => {
                out.push(ch);
                if ch == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if (state == State::Str && ch == '"') || (state == State::Char && ch == '\'') {
                    state = State::Code;
                }
            }
        }
    }

    out
}
