use atlas_core::{AppViewModel, CountryFilter, LoadPhase, LoadStage, SortOrder};

use super::constants::TITLE;

/// Build the full text frame for one view of the browser. Pure; the caller
/// decides when to print it.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(TITLE.len()));
    out.push_str("\n\n");

    if view.phase == LoadPhase::Loading {
        out.push_str(&loading_line(view));
        out.push('\n');
        return out;
    }

    if let Some(failure) = &view.load_failure {
        out.push_str(&format!("Load failed: {failure}\n\n"));
    }

    out.push_str(&format!("Countries: {}\n", view.country_count));
    out.push_str(&format!(
        "Sort By: {} | Filter: {}\n",
        sort_label(view.sort_order),
        filter_label(view.filter)
    ));

    for row in &view.visible {
        out.push_str(&format!(
            "\n  Name: {}\n  Area: {}\n  Region: {}\n  Flag: {}\n",
            row.name, row.area_sq_km, row.region, row.flag_url
        ));
    }

    if view.page_count > 0 {
        out.push('\n');
        out.push_str(&paginator_line(view.page_count, view.current_page));
        out.push('\n');
    }

    out
}

fn loading_line(view: &AppViewModel) -> String {
    match &view.progress {
        Some(progress) => {
            let stage = stage_label(progress.stage);
            match progress.bytes {
                Some(bytes) => format!(
                    "Loading countries... ({stage}, {} bytes)",
                    format_with_commas(bytes)
                ),
                None => format!("Loading countries... ({stage})"),
            }
        }
        None => "Loading countries...".to_string(),
    }
}

/// Page tabs, labelled from 1, with the current page bracketed.
fn paginator_line(page_count: usize, current_page: usize) -> String {
    let mut line = String::from("Pages:");
    for page in 0..page_count {
        if page == current_page {
            line.push_str(&format!(" [{}]", page + 1));
        } else {
            line.push_str(&format!(" {}", page + 1));
        }
    }
    line
}

fn sort_label(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Ascending => "Ascending",
        SortOrder::Descending => "Descending",
    }
}

fn filter_label(filter: CountryFilter) -> &'static str {
    match filter {
        CountryFilter::All => "All",
        CountryFilter::Oceania => "Oceania",
        CountryFilter::SmallerThanLithuania => "Smaller than Lithuania",
    }
}

fn stage_label(stage: LoadStage) -> &'static str {
    match stage {
        LoadStage::Downloading => "downloading",
        LoadStage::Decoding => "decoding",
    }
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use atlas_core::{CountryRowView, LoadFailure, LoadFailureKind, LoadProgress};

    use super::*;

    fn ready_view() -> AppViewModel {
        AppViewModel {
            phase: LoadPhase::Ready,
            load_failure: None,
            progress: None,
            sort_order: SortOrder::Ascending,
            filter: CountryFilter::All,
            country_count: 12,
            visible: vec![CountryRowView {
                name: "Fiji".to_string(),
                region: "Oceania".to_string(),
                area_sq_km: 18272.0,
                flag_url: "https://flags.example/fj.svg".to_string(),
            }],
            page_count: 2,
            current_page: 1,
            dirty: false,
        }
    }

    #[test]
    fn loading_frame_shows_progress() {
        let view = AppViewModel {
            progress: Some(LoadProgress {
                stage: LoadStage::Downloading,
                bytes: Some(13312),
            }),
            ..AppViewModel::default()
        };
        let frame = render(&view);
        assert!(frame.starts_with("Rest Countries\n"));
        assert!(frame.contains("Loading countries... (downloading, 13,312 bytes)"));
        assert!(!frame.contains("Countries:"));
    }

    #[test]
    fn ready_frame_lists_rows_and_brackets_current_page() {
        let frame = render(&ready_view());
        assert!(frame.contains("Countries: 12"));
        assert!(frame.contains("Sort By: Ascending | Filter: All"));
        assert!(frame.contains("  Name: Fiji\n  Area: 18272\n  Region: Oceania\n"));
        assert!(frame.contains("Pages: 1 [2]"));
    }

    #[test]
    fn failure_frame_keeps_zero_count_visible() {
        let view = AppViewModel {
            phase: LoadPhase::Ready,
            load_failure: Some(LoadFailure {
                kind: LoadFailureKind::Timeout,
                message: "no response within 10s".to_string(),
            }),
            ..AppViewModel::default()
        };
        let frame = render(&view);
        assert!(frame.contains("Load failed: timed out: no response within 10s"));
        assert!(frame.contains("Countries: 0"));
        assert!(!frame.contains("Pages:"));
    }

    #[test]
    fn empty_page_set_renders_no_paginator() {
        let view = AppViewModel {
            visible: Vec::new(),
            country_count: 0,
            page_count: 0,
            current_page: 0,
            ..ready_view()
        };
        let frame = render(&view);
        assert!(frame.contains("Countries: 0"));
        assert!(!frame.contains("Pages:"));
    }
}
