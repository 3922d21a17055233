//! Naming conventions used to infer a resource type from a controller name.
//!
//! `Admin::BlogPostsController` → `BlogPost`, `posts_controller` → `Post`,
//! `admin/categories` → `Category`.

/// Irregular plurals that the suffix rules would get wrong.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("calories", "calorie"),
];

/// Words that are the same in singular and plural.
const UNCOUNTABLE: &[&str] = &["equipment", "information", "series", "species", "news", "data", "metadata"];

/// Singularizes the last word of a CamelCase or lowercase name.
///
/// Suffix rules plus the `IRREGULAR` table; words neither covers come out wrong and
/// need an explicit model on the controller.
pub fn singularize(name: &str) -> String {
    let split = last_word_start(name);
    let (head, word) = name.split_at(split);
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return name.to_string();
    }
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return format!("{}{}", head, match_case(word, singular));
    }

    let stem_len = if lower.ends_with("ies") && lower.len() > 3 {
        // categories → category
        return format!("{}{}y", head, &word[..word.len() - 3]);
    } else if lower.ends_with("sses")
        || lower.ends_with("shes")
        || lower.ends_with("ches")
        || lower.ends_with("xes")
        || lower.ends_with("zes")
    {
        word.len() - 2
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        word.len()
    } else if lower.ends_with('s') && lower.len() > 1 {
        word.len() - 1
    } else {
        word.len()
    };
    format!("{}{}", head, &word[..stem_len])
}

/// Byte offset where the last CamelCase word of `name` begins.
fn last_word_start(name: &str) -> usize {
    name.char_indices()
        .filter(|(i, c)| *i > 0 && c.is_ascii_uppercase())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = replacement.chars();
    match (original.chars().next(), chars.next()) {
        (Some(first), Some(r)) if first.is_ascii_uppercase() => {
            r.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => replacement.to_string(),
    }
}

/// `blog_posts` → `BlogPosts`. Already-CamelCase input is left alone.
pub fn camelize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Strips namespaces and the controller suffix: `Admin::PostsController` → `Posts`.
pub fn controller_base_name(controller: &str) -> &str {
    let base = controller
        .rsplit(|c| c == '/' || c == ':')
        .next()
        .unwrap_or(controller);
    base.strip_suffix("Controller")
        .or_else(|| base.strip_suffix("_controller"))
        .unwrap_or(base)
}

/// Name of the resource type a controller is conventionally bound to.
///
/// Returns `None` when nothing is left once the namespace and suffix are removed.
pub fn infer_resource_name(controller: &str) -> Option<String> {
    let base = controller_base_name(controller);
    if base.is_empty() {
        return None;
    }
    Some(singularize(&camelize(base)))
}
