use forcelink_client::{HttpMethod, Transport};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::require;
use crate::error::{Error, Result};
use crate::query::QueryResult;
use crate::record::{Record, RecordCodec};
use crate::soql;

impl<T: Transport> super::SalesforceRestClient<T> {
    /// Execute a SOQL query and return the records of the first page.
    ///
    /// The query text is sent as given. If you are including user-provided
    /// values in the WHERE clause, escape them with [`soql::escape_string`]:
    ///
    /// ```rust,ignore
    /// use forcelink_rest::soql;
    ///
    /// let query = format!(
    ///     "SELECT Id FROM Account WHERE Name = '{}'",
    ///     soql::escape_string(user_input)
    /// );
    /// ```
    #[instrument(skip(self))]
    pub async fn query<R: DeserializeOwned>(&self, soql: &str) -> Result<Vec<R>> {
        require("soql", soql)?;
        Ok(self.query_page(soql).await?.records)
    }

    /// Execute a SOQL query and follow `nextRecordsUrl` until every page is read.
    #[instrument(skip(self))]
    pub async fn query_all<R: DeserializeOwned>(&self, soql: &str) -> Result<Vec<R>> {
        require("soql", soql)?;

        let mut page: QueryResult<R> = self.query_page(soql).await?;
        let mut records = std::mem::take(&mut page.records);

        while !page.done {
            let Some(next_url) = page.next_records_url.take() else {
                break;
            };
            debug!(next_url = %next_url, fetched = records.len(), "Fetching next page");
            page = self.query_more(&next_url).await?;
            records.append(&mut page.records);
        }

        Ok(records)
    }

    /// Fetch the page at a `nextRecordsUrl` returned by a previous query.
    #[instrument(skip(self))]
    pub async fn query_more<R: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<R>> {
        require("next_records_url", next_records_url)?;
        let instance_url = self.session()?.instance_url.clone();

        let response = self
            .request(&instance_url, next_records_url, None, HttpMethod::Get)
            .await?;
        RecordCodec::decode(response.body())
    }

    /// Fetch one record by id, projecting the fields listed in
    /// [`Record::FIELDS`].
    ///
    /// Returns `None` when no record matches. `record_id` is placed into the
    /// query text as given.
    #[instrument(skip(self))]
    pub async fn find_by_id<R: Record>(
        &self,
        object_name: &str,
        record_id: &str,
    ) -> Result<Option<R>> {
        require("object_name", object_name)?;
        require("record_id", record_id)?;

        let fields = R::projection();
        if fields.is_empty() {
            return Err(Error::invalid_argument(format!(
                "record type for {object_name} declares no fields"
            )));
        }

        let soql = soql::select_by_id(&fields, object_name, record_id);
        Ok(self.query::<R>(&soql).await?.into_iter().next())
    }

    async fn query_page<R: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<R>> {
        let base_url = self.base_url()?;
        let path = format!("query?q={}", urlencoding::encode(soql));

        let response = self.request(&base_url, &path, None, HttpMethod::Get).await?;
        RecordCodec::decode(response.body())
    }
}
