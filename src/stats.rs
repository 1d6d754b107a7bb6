use serde::Serialize;

use crate::normalize::{Category, NormalizedActivity};

/// Totals for one activity category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub count: usize,
    pub miles: f64,
    /// Mean of per-activity average speed. NaN when `count` is zero.
    pub avg_speed_mph: f64,
    /// Mean of per-activity pace. NaN when `count` is zero.
    pub avg_pace_min_per_mi: f64,
}

/// Summary over a whole batch of activities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_activities: usize,
    pub total_miles: f64,
    pub walking: CategoryStats,
    pub running: CategoryStats,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    count: usize,
    miles: f64,
    speed_sum: f64,
    pace_sum: f64,
}

impl Tally {
    fn add(self, activity: &NormalizedActivity) -> Self {
        Tally {
            count: self.count + 1,
            miles: self.miles + activity.distance_mi,
            speed_sum: self.speed_sum + activity.speed_mph,
            pace_sum: self.pace_sum + activity.pace_min_per_mi,
        }
    }

    fn finish(self) -> CategoryStats {
        let n = self.count as f64;
        CategoryStats {
            count: self.count,
            miles: self.miles,
            avg_speed_mph: self.speed_sum / n,
            avg_pace_min_per_mi: self.pace_sum / n,
        }
    }
}

impl SummaryStats {
    pub fn from_activities(activities: &[NormalizedActivity]) -> Self {
        let (walking, running) = activities.iter().fold(
            (Tally::default(), Tally::default()),
            |(walking, running), activity| match activity.category {
                Category::Walking => (walking.add(activity), running),
                Category::Running => (walking, running.add(activity)),
            },
        );

        SummaryStats {
            total_activities: activities.len(),
            total_miles: activities.iter().map(|a| a.distance_mi).sum(),
            walking: walking.finish(),
            running: running.finish(),
        }
    }

    pub fn category(&self, category: Category) -> &CategoryStats {
        match category {
            Category::Walking => &self.walking,
            Category::Running => &self.running,
        }
    }

    /// Categories with no activities, whose averages are undefined.
    pub fn empty_categories(&self) -> Vec<Category> {
        [Category::Walking, Category::Running]
            .into_iter()
            .filter(|c| self.category(*c).count == 0)
            .collect()
    }
}
