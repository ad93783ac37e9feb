use contracts::domain::a004_response_type::aggregate::{ResponseType, ResponseTypeDto};
use contracts::domain::common::RecordId;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a004_response_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ResponseType {
    fn from(m: Model) -> Self {
        ResponseType {
            id: m.id,
            name: m.name,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<ResponseType>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<ResponseType>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn exists(id: RecordId) -> anyhow::Result<bool> {
    Ok(Entity::find_by_id(id).count(conn()).await? > 0)
}

pub async fn insert(dto: &ResponseTypeDto) -> anyhow::Result<ResponseType> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(dto.name.trim().to_string()),
    };
    Ok(active.insert(conn()).await?.into())
}

pub async fn update(id: RecordId, dto: &ResponseTypeDto) -> anyhow::Result<Option<ResponseType>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    let mut active: ActiveModel = existing.into();
    active.name = Set(dto.name.trim().to_string());
    Ok(Some(active.update(conn()).await?.into()))
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<ResponseType>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    Entity::delete_by_id(id).exec(conn()).await?;
    Ok(Some(existing.into()))
}
