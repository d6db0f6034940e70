use std::marker::PhantomData;

use super::visibility::Visibility;
use crate::config::QueryConfig;
use crate::core::Filterable;
use crate::database::{PrimaryKeyOf, Store};
use crate::errors::QueryError;
use crate::filtering::{Criteria, Page, PageRequest, Predicate, PredicateCompiler};

/// Read-only query entry point for one entity.
///
/// Compiles each incoming [`Criteria`] and hands the resulting predicate to the store. Holds no
/// mutable state, so one instance can be shared behind an `Arc` by every request handler.
pub struct QueryService<E, S> {
    store: S,
    compiler: PredicateCompiler,
    config: QueryConfig,
    entity: PhantomData<fn() -> E>,
}

impl<E, S> QueryService<E, S>
where
    E: Filterable,
    S: Store<E>,
{
    pub fn new(store: S) -> Self {
        Self::with_config(store, QueryConfig::default())
    }

    pub fn with_config(store: S, config: QueryConfig) -> Self {
        let compiler = PredicateCompiler::new(store.backend());
        Self {
            store,
            compiler,
            config,
            entity: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Bind paging parameters using this service's configuration.
    ///
    /// # Errors
    ///
    /// See [`PageRequest::from_query_params`].
    pub fn page_request<I, K, V>(&self, params: I) -> Result<PageRequest, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        PageRequest::from_query_params(params, &self.config)
    }

    /// Compile `criteria` for this service's entity and backend.
    ///
    /// # Errors
    ///
    /// Schema errors from [`PredicateCompiler::compile`].
    pub fn compile(&self, criteria: Option<&Criteria>) -> Result<Predicate, QueryError> {
        self.compiler.compile::<E>(criteria)
    }

    /// Every record matching `criteria`.
    ///
    /// # Errors
    ///
    /// Schema errors from compilation, or `QueryError::Database` from the store.
    pub async fn find_all(&self, criteria: Option<&Criteria>) -> Result<Vec<E::Model>, QueryError> {
        self.find_all_for(criteria, &Visibility::All).await
    }

    /// One page of records matching `criteria`, with the total match count.
    ///
    /// # Errors
    ///
    /// Schema errors from compilation, or `QueryError::Database` from the store.
    pub async fn find_page(
        &self,
        criteria: Option<&Criteria>,
        request: &PageRequest,
    ) -> Result<Page<E::Model>, QueryError> {
        self.find_page_for(criteria, request, &Visibility::All).await
    }

    /// Number of records matching `criteria`.
    ///
    /// # Errors
    ///
    /// Schema errors from compilation, or `QueryError::Database` from the store.
    pub async fn count(&self, criteria: Option<&Criteria>) -> Result<u64, QueryError> {
        self.count_for(criteria, &Visibility::All).await
    }

    /// # Errors
    ///
    /// Same as [`QueryService::find_all`].
    pub async fn find_all_for(
        &self,
        criteria: Option<&Criteria>,
        visibility: &Visibility,
    ) -> Result<Vec<E::Model>, QueryError> {
        log_request::<E>("find by criteria", criteria);
        let Some(predicate) = self.scoped(criteria, visibility)? else {
            return Ok(Vec::new());
        };
        Ok(self.store.find_all(&predicate).await?)
    }

    /// An unresolved actor gets an empty page, without a store round-trip.
    ///
    /// # Errors
    ///
    /// Same as [`QueryService::find_page`].
    pub async fn find_page_for(
        &self,
        criteria: Option<&Criteria>,
        request: &PageRequest,
        visibility: &Visibility,
    ) -> Result<Page<E::Model>, QueryError> {
        tracing::debug!(
            resource = E::RESOURCE_NAME,
            criteria = %describe(criteria),
            page = request.page,
            size = request.size,
            "find by criteria"
        );
        let Some(predicate) = self.scoped(criteria, visibility)? else {
            return Ok(Page::empty(request));
        };
        Ok(self.store.find_page(&predicate, request).await?)
    }

    /// # Errors
    ///
    /// Same as [`QueryService::count`].
    pub async fn count_for(
        &self,
        criteria: Option<&Criteria>,
        visibility: &Visibility,
    ) -> Result<u64, QueryError> {
        log_request::<E>("count by criteria", criteria);
        let Some(predicate) = self.scoped(criteria, visibility)? else {
            return Ok(0);
        };
        Ok(self.store.count(&predicate).await?)
    }

    /// # Errors
    ///
    /// `QueryError::Database` from the store.
    pub async fn find_one(&self, id: PrimaryKeyOf<E>) -> Result<Option<E::Model>, QueryError> {
        tracing::debug!(resource = E::RESOURCE_NAME, id = ?id, "find one");
        Ok(self.store.find_by_id(id).await?)
    }

    fn scoped(
        &self,
        criteria: Option<&Criteria>,
        visibility: &Visibility,
    ) -> Result<Option<Predicate>, QueryError> {
        let predicate = self.compile(criteria)?;
        let scoped = visibility.apply(predicate);
        if scoped.is_none() {
            tracing::debug!(resource = E::RESOURCE_NAME, "actor unresolved, returning no records");
        }
        Ok(scoped)
    }
}

fn describe(criteria: Option<&Criteria>) -> String {
    criteria.map_or_else(|| "none".to_string(), ToString::to_string)
}

fn log_request<E: Filterable>(message: &'static str, criteria: Option<&Criteria>) {
    tracing::debug!(resource = E::RESOURCE_NAME, criteria = %describe(criteria), "{message}");
}
