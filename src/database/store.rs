use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, JoinType, PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, sea_query::Alias,
};
use std::marker::PhantomData;

use crate::core::Filterable;
use crate::filtering::{Page, PageRequest, Predicate, resolve_sort};

/// Primary key value type of entity `E`.
pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Build the select statement for a compiled predicate: its LEFT JOINs, `DISTINCT` when
/// hinted, and its condition.
#[must_use]
pub fn build_select<E: Filterable>(predicate: &Predicate) -> Select<E> {
    let mut select = E::find();
    for join in predicate.joins() {
        select = select.join_as(JoinType::LeftJoin, (join.relation)(), Alias::new(join.alias));
    }
    if predicate.is_distinct() {
        select = select.distinct();
    }
    select.filter(predicate.condition().clone())
}

/// Persistence boundary of the query service.
///
/// Implementations execute compiled predicates; they never see a `Criteria`. All failures are
/// returned as `DbErr` and are not retried.
#[async_trait]
pub trait Store<E: Filterable>: Send + Sync {
    async fn find_all(&self, predicate: &Predicate) -> Result<Vec<E::Model>, DbErr>;

    async fn find_page(
        &self,
        predicate: &Predicate,
        request: &PageRequest,
    ) -> Result<Page<E::Model>, DbErr>;

    async fn count(&self, predicate: &Predicate) -> Result<u64, DbErr>;

    async fn find_by_id(&self, id: PrimaryKeyOf<E>) -> Result<Option<E::Model>, DbErr>;

    /// Insert `model` when its primary key is unset, update it otherwise.
    async fn save(&self, model: E::ActiveModel) -> Result<E::Model, DbErr>;

    /// # Errors
    ///
    /// `DbErr::RecordNotFound` when no record has the given key.
    async fn delete_by_id(&self, id: PrimaryKeyOf<E>) -> Result<(), DbErr>;

    /// Backend the compiler must target for this store.
    fn backend(&self) -> DatabaseBackend;
}

/// [`Store`] over a Sea-ORM connection.
pub struct SeaOrmStore<E> {
    db: DatabaseConnection,
    entity: PhantomData<fn() -> E>,
}

impl<E> SeaOrmStore<E> {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }
}

impl<E> Clone for SeaOrmStore<E> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

impl<E> std::fmt::Debug for SeaOrmStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeaOrmStore")
            .field("backend", &self.db.get_database_backend())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<E> Store<E> for SeaOrmStore<E>
where
    E: Filterable,
    E::Model: Sync + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
{
    async fn find_all(&self, predicate: &Predicate) -> Result<Vec<E::Model>, DbErr> {
        build_select::<E>(predicate).all(&self.db).await
    }

    async fn find_page(
        &self,
        predicate: &Predicate,
        request: &PageRequest,
    ) -> Result<Page<E::Model>, DbErr> {
        let mut select = build_select::<E>(predicate);
        for (column, order) in resolve_sort::<E>(&request.sort) {
            select = select.order_by(column, order);
        }
        let content = select
            .offset(request.offset())
            .limit(request.size)
            .all(&self.db)
            .await?;
        let total = self.count(predicate).await?;
        Ok(Page::new(content, request, total))
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64, DbErr> {
        PaginatorTrait::count(build_select::<E>(predicate), &self.db).await
    }

    async fn find_by_id(&self, id: PrimaryKeyOf<E>) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    async fn save(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        if model.get_primary_key_value().is_some() {
            model.update(&self.db).await
        } else {
            model.insert(&self.db).await
        }
    }

    async fn delete_by_id(&self, id: PrimaryKeyOf<E>) -> Result<(), DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        match result.rows_affected {
            0 => Err(DbErr::RecordNotFound(format!(
                "{} not found",
                E::RESOURCE_NAME
            ))),
            _ => Ok(()),
        }
    }

    fn backend(&self) -> DatabaseBackend {
        self.db.get_database_backend()
    }
}
