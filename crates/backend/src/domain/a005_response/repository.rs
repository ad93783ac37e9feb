use chrono::NaiveDate;
use contracts::domain::a005_response::aggregate::{Response, ResponseDto};
use contracts::domain::common::RecordId;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a005_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub application_id: i64,
    pub response_type_id: i64,
    pub date_received: NaiveDate,
    #[sea_orm(column_type = "Text", nullable)]
    pub data: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Response {
    fn from(m: Model) -> Self {
        Response {
            id: m.id,
            application_id: m.application_id,
            response_type_id: m.response_type_id,
            date_received: m.date_received,
            data: m.data,
        }
    }
}

fn apply(active: &mut ActiveModel, dto: &ResponseDto) {
    active.application_id = Set(dto.application_id);
    active.response_type_id = Set(dto.response_type_id);
    active.date_received = Set(dto.date_received);
    active.data = Set(dto.data.clone());
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Response>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<Response>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(dto: &ResponseDto) -> anyhow::Result<Response> {
    let mut active = <ActiveModel as Default>::default();
    apply(&mut active, dto);
    Ok(active.insert(conn()).await?.into())
}

pub async fn update(id: RecordId, dto: &ResponseDto) -> anyhow::Result<Option<Response>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    let mut active: ActiveModel = existing.into();
    apply(&mut active, dto);
    Ok(Some(active.update(conn()).await?.into()))
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<Response>> {
    let Some(existing) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    Entity::delete_by_id(id).exec(conn()).await?;
    Ok(Some(existing.into()))
}
