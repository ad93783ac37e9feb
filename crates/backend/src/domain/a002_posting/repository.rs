use contracts::domain::a002_posting::aggregate::{Posting, PostingDto};
use contracts::domain::common::RecordId;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_postings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub platform: String,
    pub company: String,
    pub title: String,
    pub salary: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub responsibilities: String,
    #[sea_orm(column_type = "Text")]
    pub qualifications: String,
    pub remote: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Posting {
    fn from(m: Model) -> Self {
        Posting {
            id: m.id,
            platform: m.platform,
            company: m.company,
            title: m.title,
            salary: m.salary,
            description: m.description,
            responsibilities: m.responsibilities,
            qualifications: m.qualifications,
            remote: m.remote,
        }
    }
}

/// Copy every DTO column onto the active model
fn apply(active: &mut ActiveModel, dto: &PostingDto) {
    active.platform = Set(dto.platform.clone());
    active.company = Set(dto.company.clone());
    active.title = Set(dto.title.clone());
    active.salary = Set(dto.salary);
    active.description = Set(dto.description.clone());
    active.responsibilities = Set(dto.responsibilities.clone());
    active.qualifications = Set(dto.qualifications.clone());
    active.remote = Set(dto.remote);
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Posting>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<Posting>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn exists(id: RecordId) -> anyhow::Result<bool> {
    Ok(Entity::find_by_id(id).count(conn()).await? > 0)
}

pub async fn insert(dto: &PostingDto) -> anyhow::Result<Posting> {
    let mut active = <ActiveModel as Default>::default();
    apply(&mut active, dto);
    Ok(active.insert(conn()).await?.into())
}

pub async fn update(id: RecordId, dto: &PostingDto) -> anyhow::Result<Option<Posting>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    let mut active: ActiveModel = existing.into();
    apply(&mut active, dto);
    Ok(Some(active.update(conn()).await?.into()))
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<Posting>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    Entity::delete_by_id(id).exec(conn()).await?;
    Ok(Some(existing.into()))
}
