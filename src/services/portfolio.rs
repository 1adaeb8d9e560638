use crate::dx::{DxClient, PricePoint, UpstreamError};
use crate::models::{LookupCondition, PortfolioView};
use crate::services::name_resolver::NameResolver;

/// Loads everything shown for one account: its agents, their actions and
/// their prompts, reshaped into a [`PortfolioView`].
#[derive(Debug, Clone)]
pub struct PortfolioService {
    dx: DxClient,
    resolver: NameResolver,
}

impl PortfolioService {
    pub fn new(dx: DxClient, resolver: NameResolver) -> Self {
        Self { dx, resolver }
    }

    /// Lookup from an optional free-text query. Missing or blank input is the
    /// landing state, not an error.
    pub async fn search(&self, input: Option<&str>) -> Result<PortfolioView, UpstreamError> {
        match input.map(str::trim).filter(|s| !s.is_empty()) {
            Some(query) => self.lookup(query).await,
            None => Ok(PortfolioView::empty("", LookupCondition::NoQuery)),
        }
    }

    /// Resolve `input` and load its portfolio. Unresolvable input and
    /// accounts without agents come back as a view carrying a condition;
    /// only upstream failures are errors.
    pub async fn lookup(&self, input: &str) -> Result<PortfolioView, UpstreamError> {
        let input = input.trim();
        let resolution = self.resolver.resolve(input).await;

        if resolution.is_empty() {
            return Ok(PortfolioView::empty("", LookupCondition::NoQuery));
        }
        if resolution.error.is_some() {
            return Ok(PortfolioView::empty(input, LookupCondition::InvalidAddress));
        }

        let address = resolution.address;
        let agents = self.dx.get_agents(&address).await?;
        if agents.is_empty() {
            tracing::info!(%address, "No agents found");
            let mut view = PortfolioView::empty(input, LookupCondition::NoAgents);
            view.resolved_address = Some(address);
            return Ok(view);
        }

        let agent_ids: Vec<String> = agents.iter().map(|a| a.id.clone()).collect();
        let (actions, prompts) = tokio::try_join!(
            self.dx.get_actions(&agent_ids),
            self.dx.get_prompts(&agent_ids),
        )?;

        tracing::info!(
            %address,
            agents = agents.len(),
            actions = actions.len(),
            "Portfolio loaded"
        );

        Ok(PortfolioView::build(input, &address, agents, actions, prompts))
    }

    pub async fn price_history(&self, asset: &str) -> Result<Vec<PricePoint>, UpstreamError> {
        self.dx.get_price_history(asset).await
    }
}
