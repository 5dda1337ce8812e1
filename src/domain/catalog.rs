//! Static tables: the auction dataset schemas and the dashboard sections.

use std::sync::OnceLock;

use crate::domain::entities::column::{ColumnKind, ColumnSpec, DatasetSchema, GradientPolarity, Tone};

use ColumnKind::{Date, Number};
use GradientPolarity::{HigherIsBetter, LowerIsBetter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Dams,
    Horses,
    PastAuctions,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Dams,
        DatasetKind::Horses,
        DatasetKind::PastAuctions,
    ];

    /// Path segment under `/api/data/` and local file stem.
    pub fn slug(self) -> &'static str {
        match self {
            DatasetKind::Dams => "dams",
            DatasetKind::Horses => "horses",
            DatasetKind::PastAuctions => "past_auctions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DatasetKind::Dams => "Dams up for auction",
            DatasetKind::Horses => "Horses up for auction",
            DatasetKind::PastAuctions => "Past Auctions",
        }
    }

    pub fn schema(self) -> &'static DatasetSchema {
        static DAMS: OnceLock<DatasetSchema> = OnceLock::new();
        static HORSES: OnceLock<DatasetSchema> = OnceLock::new();
        static PAST: OnceLock<DatasetSchema> = OnceLock::new();
        match self {
            DatasetKind::Dams => DAMS.get_or_init(dams_schema),
            DatasetKind::Horses => HORSES.get_or_init(horses_schema),
            DatasetKind::PastAuctions => PAST.get_or_init(past_auctions_schema),
        }
    }
}

fn col(key: &str) -> ColumnSpec {
    ColumnSpec::new(key)
}

fn cols(keys: &[&str], min_width: u16) -> Vec<ColumnSpec> {
    keys.iter().map(|key| col(key).min_width(min_width)).collect()
}

fn dams_schema() -> DatasetSchema {
    DatasetSchema::new("dams", 1)
        .group(
            "Basic Information",
            Tone::Green100,
            [
                col("Ranking"),
                col("Name").filter_label("Horse").min_width(200),
                col("Sire").filterable().min_width(160),
                col("Dam").filterable().min_width(160),
                col("Haras").filterable().min_width(200),
            ],
        )
        .group(
            "Selection",
            Tone::Green50,
            [
                col("TPBRS").gradient(HigherIsBetter).min_width(30),
                col("PBRS").gradient(HigherIsBetter).min_width(20),
                col("PB").gradient(HigherIsBetter).min_width(20),
                col("PRS").gradient(HigherIsBetter).min_width(20),
                col("PR").gradient(HigherIsBetter).min_width(20),
                col("PS").gradient(HigherIsBetter).min_width(20),
            ],
        )
        .group(
            "Decomposing PS Factors",
            Tone::Orange50,
            cols(
                &[
                    "Age and Racing Career",
                    "Offsprings' Quality",
                    "Siblings' quality",
                    "Parents Career",
                ],
                20,
            ),
        )
        .group(
            "Main Characteristics",
            Tone::Yellow50,
            cols(
                &[
                    "Age",
                    "Top 3 BSN's",
                    "Raced Stk? Won G-Stk?",
                    "#Offs Ran",
                    "Dam's Foals Top 3 BSN",
                    "Foals before 3yo(non-ALT)",
                    "Foals Stk Rnrs",
                    "Foals Stk Wnrs",
                    "Siblings total G-stk runs",
                    "Siblings total G-stk wins",
                ],
                20,
            ),
        )
        .group(
            "Inbreeding",
            Tone::Red100,
            [col("Inbreeding Coef.")
                .gradient(LowerIsBetter)
                .percent()
                .min_width(20)],
        )
        .group(
            "Factors PB/PR",
            Tone::Gray100,
            [
                col("#Offs Ran / #Running age").min_width(20).tone(Tone::Gray50),
                col("#Services").min_width(20).tone(Tone::Gray50),
                col("#Births").min_width(20).tone(Tone::Gray50),
                col("Date last service").min_width(30).tone(Tone::Gray50),
                col("Birth Rate").min_width(20).tone(Tone::Gray50),
            ],
        )
        .group(
            "Detailed Racing Career",
            Tone::Blue50,
            cols(&["Total Races", "Total Wins", "G1 Placed", "G1 Wins"], 20),
        )
        .group(
            "Auction Info",
            Tone::Gray200,
            [
                col("Lote").min_width(80),
                col("Start").min_width(30),
                col("End").min_width(30),
            ],
        )
}

fn horses_schema() -> DatasetSchema {
    let text = |key: &str| col(key).kind(ColumnKind::Text);
    DatasetSchema::new("horses", 1)
        .group(
            "Basic Information",
            Tone::Gray100,
            [
                text("Ranking Gen23").min_width(80),
                text("Horse").filterable().min_width(100),
                text("Sire").filterable().min_width(100),
                text("Dam").filterable().min_width(100),
                text("Haras").filterable().min_width(100),
                text("Sex").min_width(20),
                col("Birth Month").kind(Date).min_width(20),
                col("Birth Date").kind(Date).min_width(20),
            ],
        )
        .group(
            "Selection",
            Tone::Green100,
            [
                col("PRS").kind(Number).gradient(HigherIsBetter).min_width(20),
                col("PR").kind(Number).gradient(HigherIsBetter).min_width(20),
                col("PS").kind(Number).gradient(HigherIsBetter).min_width(20),
            ],
        )
        .group(
            "Decomposing PS Factors",
            Tone::Orange50,
            [
                text("Sire PS").min_width(20),
                text("Dam's Age and Racing Career").min_width(20),
                text("Dam's Offsprings Performance").min_width(20),
                text("Dam's Family (Parents & Siblings)").min_width(20),
            ],
        )
        .group(
            "Sire's PS Characteristics",
            Tone::Yellow50,
            [
                text("STK Races /Races").min_width(20),
                text("STK Wins 2-5yo/#2-5yo").min_width(20),
                text("Recent G1 Wnrs/Born").min_width(20),
            ],
        )
        .group(
            "Dam's PS Characteristics",
            Tone::Gray100,
            [
                col("Age").kind(Number).min_width(20),
                text("Top BSNs").min_width(20),
                text("Raced Stk? Won G-Stk? Won-G1?").min_width(20),
                text("#Offs Ran").min_width(20),
                text("Offs Top BSNs").min_width(20),
                text("Offs Wnrs before 3yo(non-ALT)").min_width(20),
                text("Offs Stk Wnrs").min_width(20),
                text("CEI per offs(**)").min_width(20),
                text("Dam's Siblings(GS) Stk wins").min_width(20),
            ],
        )
        .group(
            "Internal Value",
            Tone::Yellow200,
            [col("PRS Value (2.200 USDB per Bps)").kind(Number).min_width(20)],
        )
        .group(
            "Auction Info",
            Tone::Gray200,
            [
                col("Start").kind(Date).min_width(30),
                col("End").kind(Date).min_width(30),
                text("Lote").min_width(20),
                text("Href"),
            ],
        )
}

fn past_auctions_schema() -> DatasetSchema {
    DatasetSchema::new("past_auctions", 1)
        .paged(500)
        .group(
            "Basic Information",
            Tone::Gray100,
            [
                col("Name").filter_label("Horse"),
                col("Sire").filterable(),
                col("Dam").filterable(),
                col("Birth Date"),
                col("Haras").filterable(),
                col("Sex"),
            ],
        )
        .group(
            "Selection",
            Tone::Green100,
            [
                col("PRS").gradient(HigherIsBetter),
                col("PS").gradient(HigherIsBetter),
                col("PR").gradient(HigherIsBetter),
            ],
        )
        .group(
            "Auction Info",
            Tone::Yellow100,
            [
                col("Value USDB"),
                col("Price per Bp"),
                col("Auction Order"),
                col("Auction Date"),
                col("Year").filterable(),
                col("Title"),
            ],
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedLink {
    pub title: &'static str,
    pub url: &'static str,
}

/// Configuration of one report board: which partition it lists and which
/// filters it offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSpec {
    pub title: &'static str,
    pub location: &'static str,
    pub criador: Option<&'static str>,
    pub category_filter: bool,
    pub date_filter: bool,
    pub criador_filter: bool,
    pub pinned: &'static [PinnedLink],
}

impl BoardSpec {
    const fn new(title: &'static str, location: &'static str) -> Self {
        Self {
            title,
            location,
            criador: None,
            category_filter: true,
            date_filter: false,
            criador_filter: false,
            pinned: &[],
        }
    }

    const fn pinned(mut self, pinned: &'static [PinnedLink]) -> Self {
        self.pinned = pinned;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreederPage {
    pub slug: &'static str,
    pub name: &'static str,
}

pub const BREEDER_PAGES: [BreederPage; 5] = [
    BreederPage { slug: "firmamento", name: "Firmamento" },
    BreederPage { slug: "gran-muneca", name: "Haras Gran Muñeca" },
    BreederPage { slug: "la-nora", name: "La Nora" },
    BreederPage { slug: "abolengo", name: "Abolengo" },
    BreederPage { slug: "vacacion", name: "Vacacion" },
];

const BREEDER_LINKS: &[PinnedLink] = &[
    PinnedLink {
        title: "Criador Table",
        url: "https://docs.google.com/spreadsheets/d/131ORjkKEyewcLVQkXC00oMI-gmCZKFcO/edit?usp=drive_link&ouid=114898536092612537397&rtpof=true&sd=true",
    },
    PinnedLink {
        title: "Firmamento Report",
        url: "https://drive.google.com/file/d/1XPhELxhJy83UCcKbxVFoPjPl-eghul0v/view?usp=drive_link",
    },
    PinnedLink {
        title: "Proposal La Pasion",
        url: "https://drive.google.com/file/d/1I7T5c7txWsWIU4baOt8TUrxUs9YFqyxc/view?usp=drive_link",
    },
];

const SIRE_LINKS: &[PinnedLink] = &[
    PinnedLink {
        title: "Padrillos Table - CB",
        url: "https://docs.google.com/spreadsheets/d/1UgWSZ4W2axebW6bOiqMLKWLCVlHP7VkW/edit?usp=drive_link",
    },
    PinnedLink {
        title: "Envidienme - Profile",
        url: "https://drive.google.com/file/d/1k72dGx4w32kruH1uSLl6Y_naH-_JXy3A/view?usp=drive_link",
    },
    PinnedLink {
        title: "Past Auctions Table",
        url: "https://docs.google.com/spreadsheets/d/13tjcOk3hUZAMk65gZk_peJV4XVUHgu0hyO6ch3cPlBg/edit?usp=drive_link",
    },
];

const FOAL_LINKS: &[PinnedLink] = &[PinnedLink {
    title: "Comparing Generations",
    url: "https://docs.google.com/spreadsheets/d/1SL_1IohEmQBG5jECf8bMjABxdC9C46WY/edit?usp=drive_link&ouid=114898536092612537397&rtpof=true&sd=true",
}];

const TRAINER_LINKS: &[PinnedLink] = &[PinnedLink {
    title: "Report Frenkel",
    url: "https://drive.google.com/file/d/1MJ8IKVKJK2Ea4jA1615Z7BMW1CmQvG6k/view?usp=drive_link",
}];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    Auctions,
    Breeders,
    Breeder(BreederPage),
    Jockeys,
    Trainers,
    Foals,
    Dams,
    Sires,
}

impl Section {
    /// Sections listed in the navigation bar and on the home grid.
    pub const TOP_LEVEL: [Section; 7] = [
        Section::Auctions,
        Section::Sires,
        Section::Breeders,
        Section::Jockeys,
        Section::Trainers,
        Section::Foals,
        Section::Dams,
    ];

    pub fn path(self) -> String {
        match self {
            Section::Home => "/".to_string(),
            Section::Auctions => "/auctions".to_string(),
            Section::Breeders => "/criador".to_string(),
            Section::Breeder(page) => format!("/criador/{}", page.slug),
            Section::Jockeys => "/jockey".to_string(),
            Section::Trainers => "/entrenador".to_string(),
            Section::Foals => "/crias/stk-winners-updates".to_string(),
            Section::Dams => "/dams".to_string(),
            Section::Sires => "/padrillo".to_string(),
        }
    }

    pub fn from_path(path: &str) -> Option<Section> {
        let path = path.trim_end_matches('/');
        let section = match path.to_ascii_lowercase().as_str() {
            "" => Section::Home,
            "/auctions" => Section::Auctions,
            "/criador" => Section::Breeders,
            "/jockey" => Section::Jockeys,
            "/entrenador" => Section::Trainers,
            "/crias" | "/crias/stk-winners-updates" => Section::Foals,
            "/dams" => Section::Dams,
            "/padrillo" => Section::Sires,
            other => {
                let slug = other.strip_prefix("/criador/")?;
                let page = BREEDER_PAGES.iter().find(|page| page.slug == slug)?;
                Section::Breeder(*page)
            }
        };
        Some(section)
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Move37 Dashboard",
            Section::Auctions => "Auctions",
            Section::Breeders => "Criador",
            Section::Breeder(page) => page.name,
            Section::Jockeys => "Jockey",
            Section::Trainers => "Entrenador",
            Section::Foals => "Crías",
            Section::Dams => "Dams",
            Section::Sires => "Padrillo",
        }
    }

    pub fn parent(self) -> Option<Section> {
        match self {
            Section::Home => None,
            Section::Breeder(_) => Some(Section::Breeders),
            _ => Some(Section::Home),
        }
    }

    /// Report board shown by this section, if it has one.
    pub fn board(self) -> Option<BoardSpec> {
        match self {
            Section::Home | Section::Auctions => None,
            Section::Breeders => Some(BoardSpec {
                criador_filter: true,
                date_filter: true,
                ..BoardSpec::new("Criador Reports", "criador").pinned(BREEDER_LINKS)
            }),
            Section::Breeder(page) => Some(BoardSpec {
                criador: Some(page.name),
                ..BoardSpec::new(page.name, page.slug)
            }),
            Section::Jockeys => Some(BoardSpec::new("Jockey Reports", "jockey")),
            Section::Trainers => {
                Some(BoardSpec::new("Entrenador Reports", "trainer").pinned(TRAINER_LINKS))
            }
            Section::Foals => Some(BoardSpec {
                criador_filter: true,
                date_filter: true,
                ..BoardSpec::new("Stk Winners Updates", "crias-stk-winners-updates")
                    .pinned(FOAL_LINKS)
            }),
            Section::Dams => Some(BoardSpec::new("Dams Reports", "dams")),
            Section::Sires => Some(BoardSpec::new("Padrillo Reports", "padrillo").pinned(SIRE_LINKS)),
        }
    }
}
