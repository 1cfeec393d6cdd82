use async_trait::async_trait;
use crate::books::domain::model::Stats;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::StatsKind;

pub struct GetStatsCommand<'a> {
    catalog_service: &'a dyn CatalogService,
}

impl<'a> GetStatsCommand<'a> {
    pub fn new(catalog_service: &'a dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub struct GetStatsCommandRequest {
    pub kind: StatsKind,
}

impl GetStatsCommandRequest {
    pub fn new(kind: StatsKind) -> Self {
        Self {
            kind,
        }
    }
}

#[derive(Debug)]
pub struct GetStatsCommandResponse {
    pub stats: Stats,
}

#[async_trait]
impl<'a> Command<GetStatsCommandRequest, GetStatsCommandResponse> for GetStatsCommand<'a> {
    async fn execute(&mut self, req: GetStatsCommandRequest) -> Result<GetStatsCommandResponse, CommandError> {
        self.catalog_service.get_stats(req.kind).await
            .map_err(CommandError::from)
            .map(|stats| GetStatsCommandResponse { stats })
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::Stats;
    use crate::catalog::command::get_stats_cmd::{GetStatsCommand, GetStatsCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::StatsKind;

    #[tokio::test]
    async fn test_should_run_total_copies() {
        let svc = factory::create_catalog_service(&Configuration::in_memory());
        let res = GetStatsCommand::new(svc.as_ref())
            .execute(GetStatsCommandRequest::new(StatsKind::TotalCopies)).await.expect("should count");
        assert_eq!(Stats::TotalCopies(21), res.stats);
    }

    #[tokio::test]
    async fn test_should_run_by_author() {
        let svc = factory::create_catalog_service(&Configuration::in_memory());
        let res = GetStatsCommand::new(svc.as_ref())
            .execute(GetStatsCommandRequest::new(StatsKind::ByAuthor)).await.expect("should count");
        match res.stats {
            Stats::ByAuthor(counts) => assert_eq!(Some(&1), counts.get("Станислав Лем")),
            other => panic!("unexpected stats {:?}", other),
        }
    }
}
