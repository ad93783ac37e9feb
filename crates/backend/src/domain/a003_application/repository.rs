use chrono::NaiveDate;
use contracts::domain::a003_application::aggregate::{Application, ApplicationDto};
use contracts::domain::common::RecordId;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a003_applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub posting_id: i64,
    pub resume_id: i64,
    pub date_submitted: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Application {
    fn from(m: Model) -> Self {
        Application {
            id: m.id,
            posting_id: m.posting_id,
            resume_id: m.resume_id,
            date_submitted: m.date_submitted,
        }
    }
}

fn apply(active: &mut ActiveModel, dto: &ApplicationDto) {
    active.posting_id = Set(dto.posting_id);
    active.resume_id = Set(dto.resume_id);
    active.date_submitted = Set(dto.date_submitted);
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Application>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<Application>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn exists(id: RecordId) -> anyhow::Result<bool> {
    Ok(Entity::find_by_id(id).count(conn()).await? > 0)
}

pub async fn insert(dto: &ApplicationDto) -> anyhow::Result<Application> {
    let mut active = <ActiveModel as Default>::default();
    apply(&mut active, dto);
    Ok(active.insert(conn()).await?.into())
}

pub async fn update(id: RecordId, dto: &ApplicationDto) -> anyhow::Result<Option<Application>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    let mut active: ActiveModel = existing.into();
    apply(&mut active, dto);
    Ok(Some(active.update(conn()).await?.into()))
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<Application>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    Entity::delete_by_id(id).exec(conn()).await?;
    Ok(Some(existing.into()))
}
