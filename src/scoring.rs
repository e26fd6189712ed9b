// Copyright 2025 Cowboy AI, LLC.

//! Score aggregation
//!
//! Averages an employee's scores per assigned criterion over the full review
//! history. Scores are matched to criteria by identity, so reviews taken
//! while the employee had a different criteria set still line up with the
//! criterion that produced each score.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Criteria, CriteriaId, Review, User};

/// Aggregated scores for one employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeScore {
    /// Employee name as shown on reports
    pub display_name: String,
    /// Number of reviews of the employee
    pub review_count: usize,
    /// Average score by criterion description; criteria no review scored are absent
    pub per_criterion_average: BTreeMap<String, i32>,
}

#[derive(Default, Clone, Copy)]
struct Tally {
    sum: i64,
    count: i64,
}

impl Tally {
    fn average(self) -> Option<i32> {
        // Integer division truncates toward zero; the mean of i32 values fits i32.
        (self.count > 0).then(|| (self.sum / self.count) as i32)
    }
}

/// Per-criterion averaging over a review history
pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Compute `employee`'s average score per currently assigned criterion
    ///
    /// `assigned_criteria` supplies the names of the employee's criteria;
    /// entries not assigned to the employee are ignored. Reviews of other
    /// employees are ignored as well. With no reviews the result has a zero
    /// count and an empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use review_domain::{Criteria, CriteriaId, Evaluation, OrganizationId, Review, ScoreAggregator, TeamId, User, UserId};
    ///
    /// let org = OrganizationId::new(1);
    /// let mut quality = Criteria::new("Quality", org);
    /// quality.id = CriteriaId::new(1);
    ///
    /// let mut employee = User::new("Ada", "Lovelace", org);
    /// employee.id = UserId::new(2);
    /// employee.criteria.insert(quality.id);
    ///
    /// let review = Review::new(UserId::new(3), employee.id, TeamId::new(1), org,
    ///     Evaluation::from([(quality.id, 9)]));
    ///
    /// let score = ScoreAggregator::compute_scores(&employee, &[quality], &[review]);
    /// assert_eq!(score.review_count, 1);
    /// assert_eq!(score.per_criterion_average["Quality"], 9);
    /// ```
    pub fn compute_scores(
        employee: &User,
        assigned_criteria: &[Criteria],
        reviews: &[Review],
    ) -> EmployeeScore {
        let reviews: Vec<&Review> = reviews
            .iter()
            .filter(|review| review.reviewee_id == employee.id)
            .collect();

        let mut tallies: BTreeMap<CriteriaId, Tally> = employee
            .criteria
            .iter()
            .map(|criteria_id| (*criteria_id, Tally::default()))
            .collect();

        for review in &reviews {
            for (criteria_id, score) in &review.evaluation {
                if let Some(tally) = tallies.get_mut(criteria_id) {
                    tally.sum += i64::from(*score);
                    tally.count += 1;
                }
            }
        }

        let per_criterion_average = assigned_criteria
            .iter()
            .filter_map(|criteria| {
                let average = tallies.get(&criteria.id)?.average()?;
                Some((criteria.description.clone(), average))
            })
            .collect();

        EmployeeScore {
            display_name: employee.display_name(),
            review_count: reviews.len(),
            per_criterion_average,
        }
    }
}
