use async_graphql::*;

use hazri_db::models::institute::Institute as InstituteData;
use hazri_db::models::subject::Subject as SubjectData;

use crate::get_conn_from_ctx;

use super::subject::Subject;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub(crate) struct Institute {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) is_active: bool,
}

#[ComplexObject]
impl Institute {
    async fn subjects(&self, ctx: &Context<'_>) -> Result<Vec<Subject>> {
        Ok(SubjectData::list_active(self.id, &get_conn_from_ctx(ctx))?
            .iter()
            .map(|s| s.into())
            .collect())
    }
}

impl From<&InstituteData> for Institute {
    fn from(institute: &InstituteData) -> Self {
        Institute {
            id: institute.id,
            name: institute.name.clone(),
            is_active: institute.is_active,
        }
    }
}
