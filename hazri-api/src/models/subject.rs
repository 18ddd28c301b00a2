use std::str::FromStr;

use async_graphql::*;
use strum_macros::{Display, EnumString};

use hazri_db::models::subject::Subject as SubjectData;

#[derive(Copy, Clone, Eq, PartialEq, Enum, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(SimpleObject, Clone)]
pub(crate) struct Subject {
    pub(crate) id: i32,
    pub(crate) institute_id: i32,
    pub(crate) name: String,
    pub(crate) difficulty: Difficulty,
    pub(crate) color_code: String,
    pub(crate) is_active: bool,
}

impl From<&SubjectData> for Subject {
    fn from(subject: &SubjectData) -> Self {
        Subject {
            id: subject.id,
            institute_id: subject.institute_id,
            name: subject.name.clone(),
            difficulty: Difficulty::from_str(&subject.difficulty)
                .expect(&format!("cannot convert {} to Difficulty", &subject.difficulty)),
            color_code: subject.color_code.clone(),
            is_active: subject.is_active,
        }
    }
}

#[derive(InputObject)]
pub(crate) struct SubjectInput {
    pub(crate) institute_id: i32,
    pub(crate) name: String,
    pub(crate) difficulty: Difficulty,
    pub(crate) color_code: Option<String>,
}
