//! Fixture builders for documents and profiles.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use lopdf::{dictionary, Document, Object, Stream};

use prism::profile::{Education, WorkExperience};
use prism::ResumeProfile;

pub const JANE_RESUME: &str = "Jane Doe\n\
jane@x.com | +1 555 0100\n\
\n\
EXPERIENCE\n\
Senior Engineer, Acme Corp, 2019 - Present\n\
Built distributed storage in Go and C++.\n\
\n\
EDUCATION\n\
B.Sc. Computer Science, State University, 2015\n\
\n\
SKILLS\n\
Go, C++, Kubernetes\n";

pub const COVER_LETTER: &str = "Dear Hiring Manager,\n\n\
I am writing to express my interest in the Senior Engineer position.\n\
I believe my background makes me a strong fit for your team.\n\n\
Sincerely,\nJane Doe\n";

/// Builder for `ResumeProfile` fixtures.
#[derive(Default)]
pub struct ProfileBuilder {
    profile: ResumeProfile,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.profile.name = Some(name.to_string());
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.profile.email = Some(email.to_string());
        self
    }

    pub fn github(mut self, url: &str) -> Self {
        self.profile.github_url = Some(url.to_string());
        self
    }

    pub fn skills(mut self, skills: &[&str]) -> Self {
        self.profile.top_skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn education(mut self, institution: &str, degree: &str) -> Self {
        self.profile.education.push(Education {
            institution: Some(institution.to_string()),
            degree: Some(degree.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn job(mut self, company: &str, title: &str) -> Self {
        self.profile.work_experience.push(WorkExperience {
            company: Some(company.to_string()),
            job_title: Some(title.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> ResumeProfile {
        self.profile
    }
}

/// The profile the scripted model "extracts" from [`JANE_RESUME`].
pub fn jane_profile() -> ResumeProfile {
    ProfileBuilder::new()
        .name("Jane Doe")
        .email("jane@x.com")
        .skills(&["Go", "C++", "Kubernetes"])
        .education("State University", "B.Sc. Computer Science")
        .job("Acme Corp", "Senior Engineer")
        .build()
}

/// Builds a single-page PDF that shows each line of `lines` and carries a
/// link annotation per entry in `links`.
pub fn build_pdf(lines: &[&str], links: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut content = String::from("BT /F1 12 Tf 50 700 Td 14 TL");
    for line in lines {
        content.push_str(&format!(" ({}) Tj T*", line));
    }
    content.push_str(" ET");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let annots: Vec<Object> = links
        .iter()
        .map(|uri| {
            doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
                "A" => dictionary! {
                    "S" => "URI",
                    "URI" => Object::string_literal(*uri),
                },
            })
            .into()
        })
        .collect();

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Resources" => resources_id,
        "Contents" => content_id,
        "Annots" => annots,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize PDF");
    bytes
}

/// Builds a DOCX whose body has one paragraph per entry in `paragraphs`.
pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .expect("Failed to start docx entry");
    writer
        .write_all(xml.as_bytes())
        .expect("Failed to write docx entry");
    writer
        .finish()
        .expect("Failed to finish docx archive")
        .into_inner()
}
