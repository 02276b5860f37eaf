//! LaTeX resume templates.
//!
//! Templates receive data that has already been LaTeX-escaped; they only add
//! markup. Empty sections are omitted.

use crate::models::resume::ResumeData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Classic,
    Compact,
}

impl Template {
    /// Unknown names fall back to `Classic`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "compact" => Template::Compact,
            _ => Template::Classic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Compact => "compact",
        }
    }

    pub fn render(&self, data: &ResumeData) -> String {
        let style = match self {
            Template::Classic => Style {
                class_options: "11pt,a4paper",
                margin: "0.75in",
                list_options: "leftmargin=*,itemsep=2pt",
                inline_headings: false,
            },
            Template::Compact => Style {
                class_options: "10pt,letterpaper",
                margin: "0.5in",
                list_options: "leftmargin=*,noitemsep,topsep=0pt",
                inline_headings: true,
            },
        };
        style.render(data)
    }
}

struct Style {
    class_options: &'static str,
    margin: &'static str,
    list_options: &'static str,
    /// One line per entry ("Role, Company \hfill Dates") instead of two.
    inline_headings: bool,
}

impl Style {
    fn render(&self, data: &ResumeData) -> String {
        let mut tex = self.preamble();
        tex.push_str(&header(data));

        if !data.summary.trim().is_empty() {
            tex.push_str(&format!("\\section{{Summary}}\n{}\n\n", data.summary));
        }

        if !data.experience.is_empty() {
            tex.push_str("\\section{Experience}\n");
            for job in &data.experience {
                tex.push_str(&self.entry_heading(&job.role, &job.company, &job.dates, &job.location));
                tex.push_str(&self.bullets(&job.details));
            }
            tex.push('\n');
        }

        if !data.projects.is_empty() {
            tex.push_str("\\section{Projects}\n");
            for project in &data.projects {
                tex.push_str(&self.entry_heading(
                    &project.name,
                    &project.technologies,
                    &project.dates,
                    "",
                ));
                tex.push_str(&self.bullets(&project.details));
            }
            tex.push('\n');
        }

        if !data.education.is_empty() {
            tex.push_str("\\section{Education}\n");
            for edu in &data.education {
                tex.push_str(&self.entry_heading(&edu.degree, &edu.school, &edu.dates, &edu.location));
            }
            tex.push('\n');
        }

        if !data.skills.is_empty() {
            tex.push_str("\\section{Skills}\n");
            for (category, skills) in &data.skills {
                tex.push_str(&format!("\\textbf{{{category}:}} {} \\\\\n", skills.joined()));
            }
            tex.push('\n');
        }

        tex.push_str("\\end{document}\n");
        tex
    }

    fn preamble(&self) -> String {
        format!(
            "\\documentclass[{}]{{article}}\n\
             \\usepackage[utf8]{{inputenc}}\n\
             \\usepackage[T1]{{fontenc}}\n\
             \\usepackage[margin={}]{{geometry}}\n\
             \\usepackage[hidelinks]{{hyperref}}\n\
             \\usepackage{{titlesec}}\n\
             \\usepackage{{enumitem}}\n\
             \\titleformat{{\\section}}{{\\large\\bfseries\\uppercase}}{{}}{{0em}}{{}}[\\titlerule]\n\
             \\pagestyle{{empty}}\n\
             \\setlength{{\\parindent}}{{0pt}}\n\n\
             \\begin{{document}}\n\n",
            self.class_options, self.margin
        )
    }

    fn entry_heading(&self, title: &str, subtitle: &str, dates: &str, location: &str) -> String {
        if self.inline_headings {
            let lead = join_nonempty(&[title, subtitle], ", ");
            let tail = join_nonempty(&[location, dates], " | ");
            format!("\\textbf{{{lead}}} \\hfill {tail} \\\\\n")
        } else {
            format!(
                "\\textbf{{{title}}} \\hfill {dates} \\\\\n\\textit{{{subtitle}}} \\hfill \\textit{{{location}}} \\\\\n"
            )
        }
    }

    fn bullets(&self, items: &[String]) -> String {
        let items: Vec<&String> = items.iter().filter(|i| !i.trim().is_empty()).collect();
        if items.is_empty() {
            return String::new();
        }

        let mut tex = format!("\\begin{{itemize}}[{}]\n", self.list_options);
        for item in items {
            tex.push_str(&format!("  \\item {item}\n"));
        }
        tex.push_str("\\end{itemize}\n");
        tex
    }
}

fn header(data: &ResumeData) -> String {
    let contact = join_nonempty(
        &[
            data.email.as_str(),
            data.phone.as_str(),
            data.location.as_str(),
            data.linkedin.as_str(),
            data.github.as_str(),
        ],
        " | ",
    );
    format!(
        "\\begin{{center}}\n    {{\\huge \\textbf{{{}}}}} \\\\[4pt]\n    {contact}\n\\end{{center}}\n\n",
        data.name
    )
}

fn join_nonempty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use crate::models::resume::{ExperienceEntry, SkillList};

    fn sample() -> ResumeData {
        ResumeData {
            name: "Jane Doe".to_string(),
            linkedin: "linkedin.com/in/janedoe".to_string(),
            experience: vec![ExperienceEntry {
                role: "Senior Engineer".to_string(),
                company: "Acme".to_string(),
                dates: "2019 -- 2023".to_string(),
                location: "Berlin".to_string(),
                details: vec!["Built billing".to_string(), "  ".to_string()],
            }],
            skills: BTreeMap::from([(
                "Languages".to_string(),
                SkillList::List(vec!["Rust".to_string(), "Go".to_string()]),
            )]),
            ..ResumeData::default()
        }
    }

    #[test]
    fn test_unknown_template_falls_back_to_classic() {
        assert_eq!(Template::parse("modern"), Template::Classic);
        assert_eq!(Template::parse("Compact"), Template::Compact);
    }

    #[test]
    fn test_classic_layout() {
        let tex = Template::Classic.render(&sample());
        assert!(tex.starts_with("\\documentclass[11pt,a4paper]{article}"));
        assert!(tex.contains("{\\huge \\textbf{Jane Doe}}"));
        assert!(tex.contains("email@example.com | +1 234 567 890 | City, Country | linkedin.com/in/janedoe"));
        assert!(tex.contains("\\textbf{Senior Engineer} \\hfill 2019 -- 2023 \\\\\n\\textit{Acme}"));
        assert!(tex.contains("\\textbf{Languages:} Rust, Go \\\\"));
        assert!(tex.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_compact_uses_inline_headings() {
        let tex = Template::Compact.render(&sample());
        assert!(tex.starts_with("\\documentclass[10pt,letterpaper]{article}"));
        assert!(tex.contains("\\textbf{Senior Engineer, Acme} \\hfill Berlin | 2019 -- 2023 \\\\"));
    }

    #[test]
    fn test_blank_bullets_and_empty_sections_are_omitted() {
        let tex = Template::Classic.render(&sample());
        assert_eq!(tex.matches("\\item").count(), 1);
        assert!(!tex.contains("\\section{Projects}"));
        assert!(!tex.contains("\\section{Education}"));
    }
}
