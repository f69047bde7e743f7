//! Iterative evidence research for a single claim

use crate::classify;
use crate::config::ResearchConfig;
use crate::dedup::{jaccard, normalize_statement};
use crate::error::ResearchError;
use crate::queries;
use crate::types::ClaimResearch;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};
use veracity_domain::{
    AnalysisWarning, AtomicClaim, BudgetTracker, CancelToken, EvidenceId, EvidenceItem,
    EvidenceLink, ReliabilityLookup, SearchCapability, SearchHit, SearchQuery, Source, SourceId,
    Stance, WarningStage,
};

const SECS_PER_DAY: u64 = 86_400;

/// Researches evidence for claims via search and reliability capabilities
pub struct Researcher {
    search: Arc<dyn SearchCapability>,
    reliability: Arc<dyn ReliabilityLookup>,
    config: ResearchConfig,
}

impl Researcher {
    /// Create a new researcher
    pub fn new(
        search: Arc<dyn SearchCapability>,
        reliability: Arc<dyn ReliabilityLookup>,
        config: ResearchConfig,
    ) -> Self {
        Self {
            search,
            reliability,
            config,
        }
    }

    /// Research evidence for one claim
    ///
    /// `known_evidence` is evidence already retrieved for sibling claims in
    /// the same job; relevant items are linked instead of re-fetched.
    /// Cancellation and budget are checked before every external call, so a
    /// stopped job returns whatever was gathered so far.
    pub async fn research(
        &self,
        claim: &AtomicClaim,
        known_evidence: &[EvidenceItem],
        budget: &BudgetTracker,
        cancel: &CancelToken,
    ) -> Result<ClaimResearch, ResearchError> {
        info!(claim_id = %claim.id, "Researching claim");

        let mut pool = EvidencePool::new(self.config.duplicate_threshold);
        let mut warnings = Vec::new();
        let mut queries_issued = 0u32;

        // Reuse sibling evidence that is textually relevant to this claim
        for item in known_evidence {
            if jaccard(&claim.text, &item.statement) >= 0.25 {
                pool.adopt(item.clone(), &claim.text);
            }
        }

        let date_scope = if claim.recency_sensitive {
            Some(now_unix().saturating_sub(self.config.recent_window_days * SECS_PER_DAY))
        } else {
            None
        };

        'iterations: for iteration in 0..self.config.max_iterations {
            let before = pool.len();
            let searches = self.queries_for_iteration(claim, iteration, &pool, date_scope);

            for query in searches {
                if cancel.is_cancelled() {
                    debug!(claim_id = %claim.id, "Research cancelled");
                    break 'iterations;
                }
                if let Err(e) = budget.charge() {
                    warnings.push(AnalysisWarning::new(
                        WarningStage::Research,
                        format!("external call budget exhausted: {}", e),
                    ));
                    break 'iterations;
                }

                queries_issued += 1;
                match self.search_with_retry(&query).await {
                    Ok(hits) => {
                        for hit in hits.into_iter().take(self.config.max_results_per_query) {
                            self.ingest_hit(claim, hit, &mut pool, &mut warnings);
                        }
                    }
                    Err(e) => {
                        warn!(claim_id = %claim.id, error = %e, "Search query failed");
                        warnings.push(AnalysisWarning::new(
                            WarningStage::Research,
                            format!("search failed for '{}': {}", query.text, e),
                        ));
                    }
                }
            }

            let gained = pool.len() - before;
            debug!(
                claim_id = %claim.id,
                iteration,
                gained,
                total = pool.len(),
                "Research iteration complete"
            );
            if iteration > 0 && gained < self.config.min_marginal_gain {
                break;
            }
        }

        let insufficient = pool.unique_len() < self.config.min_evidence_count;
        if insufficient {
            info!(
                claim_id = %claim.id,
                unique = pool.unique_len(),
                minimum = self.config.min_evidence_count,
                "Insufficient evidence"
            );
        }

        let (evidence, links, sources) = pool.into_parts(claim.id);
        Ok(ClaimResearch {
            claim_id: claim.id,
            evidence,
            links,
            sources,
            insufficient_evidence: insufficient,
            queries_issued,
            warnings,
        })
    }

    /// The queries to issue for one iteration
    ///
    /// Iteration 0 is the initial query plus the mandatory contrarian query;
    /// later iterations refine toward whichever stance the pool lacks.
    fn queries_for_iteration(
        &self,
        claim: &AtomicClaim,
        iteration: u32,
        pool: &EvidencePool,
        date_after: Option<u64>,
    ) -> Vec<SearchQuery> {
        let scoped = |q: SearchQuery| match date_after {
            Some(after) => q.scoped_after(after),
            None => q,
        };

        if iteration == 0 {
            vec![
                scoped(SearchQuery::plain(queries::initial_query(&claim.text))),
                scoped(SearchQuery::plain(queries::contrarian_query(&claim.text)).contrarian()),
            ]
        } else {
            let missing_opposing = pool.opposing_count() == 0;
            let text = queries::refinement_query(&claim.text, iteration, missing_opposing);
            let query = if missing_opposing {
                SearchQuery::plain(text).contrarian()
            } else {
                SearchQuery::plain(text)
            };
            vec![scoped(query)]
        }
    }

    /// Execute one search with timeout and bounded retry
    async fn search_with_retry(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, ResearchError> {
        let mut last_error = ResearchError::Timeout;

        for attempt in 0..self.config.retry_attempts {
            if attempt > 0 {
                let backoff =
                    Duration::from_millis(self.config.retry_backoff_ms * (1 << (attempt - 1)));
                debug!(attempt, ?backoff, "Retrying search");
                tokio::time::sleep(backoff).await;
            }

            match tokio::time::timeout(self.config.search_timeout(), self.search.search(query))
                .await
            {
                Ok(Ok(hits)) => return Ok(hits),
                Ok(Err(e)) if e.is_retryable() => {
                    last_error = ResearchError::Search(e.to_string());
                }
                Ok(Err(e)) => return Err(ResearchError::Search(e.to_string())),
                Err(_) => {
                    last_error = ResearchError::Timeout;
                }
            }
        }

        Err(last_error)
    }

    /// Turn one search hit into a classified evidence item in the pool
    fn ingest_hit(
        &self,
        claim: &AtomicClaim,
        hit: SearchHit,
        pool: &mut EvidencePool,
        warnings: &mut Vec<AnalysisWarning>,
    ) {
        if hit.snippet.trim().is_empty() {
            return;
        }

        let source_id = pool.source_for_url(&hit.url);
        let reliability = match self.reliability.get_reliability(source_id) {
            Ok(r) => r,
            Err(e) => {
                warnings.push(AnalysisWarning::new(
                    WarningStage::Research,
                    format!("reliability lookup failed for {}: {}", hit.url, e),
                ));
                veracity_domain::SourceReliability {
                    score: 0.5,
                    source_type: "unknown".to_string(),
                }
            }
        };
        pool.record_source(source_id, &hit.url, &reliability);

        let statement = hit.snippet.trim().to_string();
        let category = classify::classify_category(&statement);
        let stance = classify::classify_stance(&claim.text, &statement);

        pool.insert(PendingItem {
            statement,
            category,
            source_id,
            stance,
            reliability_score: reliability.score,
            retrieved_at: now_unix(),
        });
    }
}

struct PendingItem {
    statement: String,
    category: veracity_domain::EvidenceCategory,
    source_id: SourceId,
    stance: Stance,
    reliability_score: f64,
    retrieved_at: u64,
}

/// Deduplicating accumulator for one claim's evidence
///
/// A near-duplicate from the same source is dropped; from a different source
/// it is kept, flagged derivative, and discounted.
struct EvidencePool {
    threshold: f64,
    items: Vec<EvidenceItem>,
    source_by_url: HashMap<String, SourceId>,
    sources: HashMap<SourceId, Source>,
}

impl EvidencePool {
    fn new(threshold: f64) -> Self {
        Self {
            threshold,
            items: Vec::new(),
            source_by_url: HashMap::new(),
            sources: HashMap::new(),
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    /// Items that are not derivative copies
    fn unique_len(&self) -> usize {
        self.items.iter().filter(|i| !i.is_derivative).count()
    }

    fn opposing_count(&self) -> usize {
        self.items.iter().filter(|i| i.stance == Stance::Opposing).count()
    }

    fn source_for_url(&mut self, url: &str) -> SourceId {
        *self
            .source_by_url
            .entry(url.to_string())
            .or_insert_with(SourceId::new)
    }

    fn record_source(
        &mut self,
        id: SourceId,
        url: &str,
        reliability: &veracity_domain::SourceReliability,
    ) {
        self.sources.entry(id).or_insert_with(|| Source {
            id,
            url: url.to_string(),
            reliability_score: reliability.score,
            source_type: reliability.source_type.clone(),
        });
    }

    /// Adopt an already-built item from a sibling claim, restancing it
    /// against this claim's text
    fn adopt(&mut self, mut item: EvidenceItem, claim_text: &str) {
        if self.duplicate_of(&item.statement, item.source_id).is_some() {
            return;
        }
        item.stance = classify::classify_stance(claim_text, &item.statement);
        self.sources.entry(item.source_id).or_insert_with(|| Source {
            id: item.source_id,
            url: String::new(),
            reliability_score: 0.5,
            source_type: "unknown".to_string(),
        });
        self.items.push(item);
    }

    fn insert(&mut self, pending: PendingItem) {
        let is_derivative = match self.duplicate_of(&pending.statement, pending.source_id) {
            Some(DuplicateKind::SameSource) => return,
            Some(DuplicateKind::OtherSource) => true,
            None => false,
        };

        let probative_value =
            classify::probative_value(pending.reliability_score, pending.category, is_derivative);
        self.items.push(EvidenceItem {
            id: EvidenceId::new(),
            statement: pending.statement,
            category: pending.category,
            source_id: pending.source_id,
            stance: pending.stance,
            probative_value,
            is_derivative,
            retrieved_at: pending.retrieved_at,
        });
    }

    fn duplicate_of(&self, statement: &str, source_id: SourceId) -> Option<DuplicateKind> {
        let normalized = normalize_statement(statement);
        for existing in &self.items {
            let exact = normalize_statement(&existing.statement) == normalized;
            if exact || jaccard(&existing.statement, statement) >= self.threshold {
                return Some(if existing.source_id == source_id {
                    DuplicateKind::SameSource
                } else {
                    DuplicateKind::OtherSource
                });
            }
        }
        None
    }

    fn into_parts(
        self,
        claim_id: veracity_domain::ClaimId,
    ) -> (Vec<EvidenceItem>, Vec<EvidenceLink>, Vec<Source>) {
        let links = self
            .items
            .iter()
            .map(|item| EvidenceLink {
                claim_id,
                evidence_id: item.id,
                stance: item.stance,
            })
            .collect();
        let mut sources: Vec<Source> = self.sources.into_values().collect();
        sources.sort_by(|a, b| a.id.value().cmp(&b.id.value()));
        (self.items, links, sources)
    }
}

enum DuplicateKind {
    SameSource,
    OtherSource,
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
