use phq9_core::models::{DifficultyAnswer, QuestionNumber, SeverityBand};

use crate::Instrument;
use crate::scoring::{Item, ScoreRange, SeverityRange};

/// PHQ-9: Patient Health Questionnaire, nine-item depression module.
/// Each item is rated 0-3 over the last two weeks; the total ranges 0-27.
///
/// Kroenke K, Spitzer RL, Williams JB. The PHQ-9: validity of a brief
/// depression severity measure. J Gen Intern Med. 2001;16(9):606-13.
pub struct Phq9;

pub const DIFFICULTY_QUESTION: &str = "If you checked off any problems, how difficult have these problems made it for you to do your work, take care of things at home, or get along with other people?";

const ITEMS: [&str; QuestionNumber::COUNT] = [
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself - or that you are a failure or have let yourself or your family down",
    "Trouble concentrating on things, such as reading the newspaper or watching television",
    "Moving or speaking so slowly that other people could have noticed? Or the opposite - being so fidgety or restless that you have been moving around a lot more than usual",
    "Thoughts that you would be better off dead or of hurting yourself in some way",
];

const SEVERITY: [SeverityRange; 4] = [
    SeverityRange {
        range: ScoreRange::new(0, 4),
        band: SeverityBand::NoneMinimal,
    },
    SeverityRange {
        range: ScoreRange::new(5, 9),
        band: SeverityBand::Mild,
    },
    SeverityRange {
        range: ScoreRange::new(10, 14),
        band: SeverityBand::Moderate,
    },
    SeverityRange {
        range: ScoreRange::new(15, 19),
        band: SeverityBand::ModeratelySevere,
    },
];

impl Phq9 {
    /// Wording of one item.
    pub fn question(number: QuestionNumber) -> &'static str {
        ITEMS[number.index()]
    }

    pub fn difficulty_options() -> [DifficultyAnswer; 4] {
        DifficultyAnswer::ALL
    }
}

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn items(&self) -> &[Item] {
        static ITEM_LIST: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            QuestionNumber::all()
                .map(|n| Item {
                    number: n.get(),
                    text: Phq9::question(n).to_string(),
                })
                .collect()
        });
        &ITEM_LIST
    }

    fn score_range(&self) -> ScoreRange {
        ScoreRange::new(0, 27)
    }

    fn severity_table(&self) -> &[SeverityRange] {
        &SEVERITY
    }

    /// 20 and above, including anything past 27.
    fn top_band(&self) -> SeverityBand {
        SeverityBand::Severe
    }
}
