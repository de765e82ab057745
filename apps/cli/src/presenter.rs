//! Terminal rendering of a generation result: one tab at a time, plus the
//! key-skills and suggested-tweaks lists.

use clap::ValueEnum;

use crate::models::GenerationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    Resume,
    Cover,
    Linkedin,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Resume, Tab::Cover, Tab::Linkedin];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Resume => "Resume",
            Tab::Cover => "Cover Letter",
            Tab::Linkedin => "LinkedIn Summary",
        }
    }

    /// File name used when exporting this tab.
    pub fn export_name(self) -> &'static str {
        match self {
            Tab::Resume => "Tailored_Resume.docx",
            Tab::Cover => "Cover_Letter.docx",
            Tab::Linkedin => "LinkedIn_About.docx",
        }
    }

    pub fn text(self, result: &GenerationResult) -> &str {
        match self {
            Tab::Resume => &result.resume_markdown,
            Tab::Cover => &result.cover_letter_markdown,
            Tab::Linkedin => &result.linkedin_summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TonePreset {
    #[default]
    Professional,
    Concise,
    Warm,
    Assertive,
}

impl TonePreset {
    pub fn as_prompt(self) -> &'static str {
        match self {
            TonePreset::Professional => "professional, confident, friendly",
            TonePreset::Concise => "concise, impact-focused",
            TonePreset::Warm => "warm, collaborative",
            TonePreset::Assertive => "assertive, leadership-focused",
        }
    }
}

/// The tab strip with the active tab bracketed, e.g. `[Resume]  Cover Letter`.
pub fn render_tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.title())
            } else {
                tab.title().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_block(tab: Tab, result: &GenerationResult) -> String {
    let title = tab.title();
    format!(
        "{title}\n{}\n{}\n",
        "=".repeat(title.chars().count()),
        tab.text(result)
    )
}

fn render_list(heading: &str, items: Option<&Vec<String>>) -> Option<String> {
    let items = items.filter(|items| !items.is_empty())?;
    let mut out = format!("{heading}\n");
    for item in items {
        out.push_str(&format!("  • {item}\n"));
    }
    Some(out)
}

/// Key skills and tweaks, each shown only when non-empty.
pub fn render_extras(result: &GenerationResult) -> Option<String> {
    let sections: Vec<String> = [
        render_list("Key Skills matched", result.key_skills.as_ref()),
        render_list("Suggested tweaks to your CV", result.tweaks.as_ref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n"))
    }
}

pub fn render_view(tab: Tab, result: &GenerationResult) -> String {
    let mut out = format!("{}\n\n{}", render_tab_bar(tab), render_block(tab, result));
    if let Some(extras) = render_extras(result) {
        out.push('\n');
        out.push_str(&extras);
    }
    out
}
