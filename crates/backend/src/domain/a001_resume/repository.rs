use contracts::domain::a001_resume::aggregate::{Resume, ResumeDto};
use contracts::domain::common::RecordId;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_resumes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub data: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Resume {
    fn from(m: Model) -> Self {
        Resume {
            id: m.id,
            data: m.data,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Resume>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<Resume>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn exists(id: RecordId) -> anyhow::Result<bool> {
    Ok(Entity::find_by_id(id).count(conn()).await? > 0)
}

pub async fn insert(dto: &ResumeDto) -> anyhow::Result<Resume> {
    let active = ActiveModel {
        id: NotSet,
        data: Set(dto.data.clone()),
    };
    Ok(active.insert(conn()).await?.into())
}

pub async fn update(id: RecordId, dto: &ResumeDto) -> anyhow::Result<Option<Resume>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    let mut active: ActiveModel = existing.into();
    active.data = Set(dto.data.clone());
    Ok(Some(active.update(conn()).await?.into()))
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<Resume>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    Entity::delete_by_id(id).exec(conn()).await?;
    Ok(Some(existing.into()))
}
