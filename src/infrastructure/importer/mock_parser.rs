use chrono::NaiveDate;

use crate::entities::profile::{
    EmploymentType, Experience, SamplePortfolio, VideoSample,
};

use super::{ParsedPortfolio, PortfolioParser};

/// Lookup-table importer keyed by case-insensitive substring of the URL.
#[derive(Debug, Clone, Default)]
pub struct MockPortfolioParser;

struct KnownPortfolio {
    name: &'static str,
    needle: &'static str,
    demo_url: &'static str,
    build: fn() -> ParsedPortfolio,
}

const KNOWN_PORTFOLIOS: &[KnownPortfolio] = &[
    KnownPortfolio {
        name: "Sonu's Portfolio",
        needle: "sonuchoudhary.my.canva.site",
        demo_url: "https://sonuchoudhary.my.canva.site/portfolio",
        build: sonu_choudhary,
    },
    KnownPortfolio {
        name: "Jane Doe",
        needle: "test.com",
        demo_url: "https://test.com",
        build: jane_doe,
    },
];

impl MockPortfolioParser {
    pub fn new() -> Self {
        MockPortfolioParser
    }

    /// Demo links offered on the import form.
    pub fn sample_portfolios(&self) -> Vec<SamplePortfolio> {
        KNOWN_PORTFOLIOS
            .iter()
            .map(|known| SamplePortfolio {
                name: known.name.to_string(),
                url: known.demo_url.to_string(),
            })
            .collect()
    }
}

impl PortfolioParser for MockPortfolioParser {
    fn parse(&self, portfolio_url: &str) -> ParsedPortfolio {
        let haystack = portfolio_url.to_lowercase();

        KNOWN_PORTFOLIOS
            .iter()
            .find(|known| haystack.contains(known.needle))
            .map(|known| (known.build)())
            .unwrap_or_default()
    }
}

fn video_editor(employer: &str, start: NaiveDate, samples: &[(&str, &str)]) -> Experience {
    Experience {
        job_title: "Video Editor".to_string(),
        employer_or_client: employer.to_string(),
        start_date: Some(start),
        employment_type: Some(EmploymentType::FullTime),
        videos: samples
            .iter()
            .map(|(title, url)| VideoSample::new(*title, *url))
            .collect(),
        ..Experience::empty()
    }
}

fn sonu_choudhary() -> ParsedPortfolio {
    let jan_first = |year| NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();

    ParsedPortfolio {
        first_name: Some("Sonu".to_string()),
        last_name: Some("Choudhary".to_string()),
        summary: Some(
            "I specialize in YouTube video editing, crafting high-quality content that \
             captivates audiences and drives engagement. I've had the privilege of working \
             with top creators like Uptin (3M+ followers) and XYZ Education (1M+ subscribers), \
             contributing to content that has amassed over 5 million organic views."
                .to_string(),
        ),
        experiences: Some(vec![
            video_editor(
                "TAKINGHEAD",
                jan_first(2022),
                &[
                    ("From Waste to Wonder", "https://www.youtube.com/watch?v=2GP-WuXphTk"),
                    ("Mayuri Admission video", "https://www.youtube.com/watch?v=B6yRSDWiou4"),
                ],
            ),
            video_editor(
                "CASHCOWS",
                jan_first(2023),
                &[
                    ("Title 1", "https://youtu.be/dXE_emchp5k"),
                    ("Title 2", "https://youtu.be/rSppFMxWsX4"),
                ],
            ),
        ]),
    }
}

fn jane_doe() -> ParsedPortfolio {
    ParsedPortfolio {
        first_name: Some("Jane (Mock)".to_string()),
        last_name: Some("Doe".to_string()),
        summary: Some("This profile was generated from your portfolio link...".to_string()),
        experiences: Some(Vec::new()),
    }
}
