use super::ViewState;
use crate::error::GpResult;
use crate::password::PasswordSet;
use crate::profile::Profile;

pub const TITLE: &str = "Generate Passwords Demo";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    Text,
    Html,
    Json,
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format '{other}', expected text, html or json"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, PartialEq)]
pub enum ProfilePanel<'s> {
    Hidden,
    Busy,
    Cards(&'s [Profile]),
}

/// What a frontend shows for a given [ViewState].
#[derive(Debug, PartialEq)]
pub struct Page<'s> {
    pub load_profiles: Control,
    pub profiles: ProfilePanel<'s>,
    /// Only present next to rendered profile cards.
    pub generate_passwords: Option<Control>,
    pub passwords: Option<&'s PasswordSet>,
}

impl<'s> Page<'s> {
    pub fn from_state(state: &'s ViewState) -> Self {
        let load_profiles = Control {
            label: if state.loading_profiles {
                "Loading..."
            } else {
                "Load Profiles"
            },
            enabled: !state.loading_profiles,
        };

        let profiles = match (&state.profiles, state.loading_profiles) {
            (_, true) => ProfilePanel::Busy,
            (Some(profiles), false) => ProfilePanel::Cards(profiles),
            (None, false) => ProfilePanel::Hidden,
        };

        let generate_passwords = match profiles {
            ProfilePanel::Cards(_) => Some(Control {
                label: if state.loading_passwords {
                    "Generating..."
                } else {
                    "Generate Passwords"
                },
                enabled: !state.loading_passwords,
            }),
            _ => None,
        };

        let passwords = if state.loading_passwords {
            None
        } else {
            state.passwords.as_ref()
        };

        Self {
            load_profiles,
            profiles,
            generate_passwords,
            passwords,
        }
    }
}

/// Labelled card lines, below the name header.
pub fn card_fields(profile: &Profile) -> Vec<(&'static str, String)> {
    vec![
        ("ID", profile.student_id.to_string()),
        ("Age", profile.age.to_string()),
        ("School", profile.school.clone()),
        ("Major", profile.major.clone()),
        ("Graduation", profile.graduation_year.to_string()),
        ("GPA", profile.gpa.to_string()),
        ("Email", profile.email.clone()),
        ("Location", format!("{}, {}", profile.city, profile.state)),
    ]
}

pub fn render(state: &ViewState, format: RenderFormat) -> GpResult<String> {
    match format {
        RenderFormat::Text => Ok(render_text(&Page::from_state(state))),
        RenderFormat::Html => Ok(render_html(&Page::from_state(state))),
        RenderFormat::Json => render_json(state),
    }
}

pub fn render_json(state: &ViewState) -> GpResult<String> {
    serde_json::to_string_pretty(state).map_err(|e| anyhow::Error::from(e).into())
}

fn text_control(control: &Control) -> String {
    if control.enabled {
        format!("[ {} ]\n", control.label)
    } else {
        format!("[ {} ] (disabled)\n", control.label)
    }
}

const RULE: &str = "----------------------------------------\n";

pub fn render_text(page: &Page) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&text_control(&page.load_profiles));
    out.push_str(RULE);

    match page.profiles {
        ProfilePanel::Hidden => {}
        ProfilePanel::Busy => out.push_str("Loading profiles...\n"),
        ProfilePanel::Cards(profiles) => {
            out.push_str("Profiles\n");
            for profile in profiles {
                out.push_str(&format!("+ {}\n", profile.name));
                for (label, value) in card_fields(profile) {
                    out.push_str(&format!("| {label}: {value}\n"));
                }
                out.push_str("| Interests:\n");
                for interest in &profile.interests {
                    out.push_str(&format!("|   - {interest}\n"));
                }
            }
        }
    }
    if let Some(control) = &page.generate_passwords {
        out.push_str(&text_control(control));
    }
    out.push_str(RULE);

    if let Some(passwords) = page.passwords {
        out.push_str("Generated Passwords\n");
        for (student_id, candidates) in passwords.iter() {
            out.push_str(&format!("+ {student_id}\n"));
            for candidate in candidates {
                out.push_str(&format!("|   - {candidate}\n"));
            }
        }
    }

    out
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn html_button(control: &Control) -> String {
    format!(
        "<button{}>{}</button>\n",
        if control.enabled { "" } else { " disabled" },
        escape_html(control.label)
    )
}

fn html_list<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let mut out = String::from("<ul>\n");
    for item in items {
        out.push_str(&format!("<li>{}</li>\n", escape_html(item)));
    }
    out.push_str("</ul>\n");
    out
}

pub fn render_html(page: &Page) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{TITLE}</title>\n"));
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{TITLE}</h1>\n"));
    out.push_str(&html_button(&page.load_profiles));
    out.push_str("<hr>\n");

    match page.profiles {
        ProfilePanel::Hidden => {}
        ProfilePanel::Busy => out.push_str("<p class=\"busy\">Loading profiles...</p>\n"),
        ProfilePanel::Cards(profiles) => {
            out.push_str("<div>\n<h2>Profiles</h2>\n<div class=\"cards\">\n");
            for profile in profiles {
                out.push_str("<div class=\"card\">\n");
                out.push_str(&format!("<h3>{}</h3>\n", escape_html(&profile.name)));
                for (label, value) in card_fields(profile) {
                    out.push_str(&format!(
                        "<p><b>{label}:</b> {}</p>\n",
                        escape_html(&value)
                    ));
                }
                out.push_str("<p><b>Interests:</b></p>\n");
                out.push_str(&html_list(&profile.interests));
                out.push_str("</div>\n");
            }
            out.push_str("</div>\n");
            if let Some(control) = &page.generate_passwords {
                out.push_str(&html_button(control));
            }
            out.push_str("</div>\n");
        }
    }
    out.push_str("<hr>\n");

    if let Some(passwords) = page.passwords {
        out.push_str("<div>\n<h2>Generated Passwords</h2>\n<div class=\"cards\">\n");
        for (student_id, candidates) in passwords.iter() {
            out.push_str("<div class=\"card\">\n");
            out.push_str(&format!("<h3>{}</h3>\n", escape_html(student_id.as_ref())));
            out.push_str(&html_list(candidates));
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}
