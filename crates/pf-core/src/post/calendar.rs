//! Calendar bucketing of posts by publication date

use super::model::Post;
use crate::error::{Result, WorkflowError};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One day in a calendar month
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    /// The date
    pub date: NaiveDate,
    /// Posts shown on this date
    pub posts: Vec<Post>,
}

/// A month of days with the posts scheduled on each
#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    /// Calendar year
    pub year: i32,
    /// Month number, 1-12
    pub month: u32,
    /// Every day of the month, in order
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// Bucket posts into the days of the given month
    ///
    /// Posts whose calendar date falls outside the month are ignored.
    pub fn build(year: i32, month: u32, posts: impl IntoIterator<Item = Post>) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            WorkflowError::Validation(format!("Invalid calendar month: {}-{:02}", year, month))
        })?;

        let mut days: Vec<CalendarDay> = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|date| CalendarDay {
                date,
                posts: Vec::new(),
            })
            .collect();

        let mut in_month: Vec<Post> = posts
            .into_iter()
            .filter(|p| {
                let date = p.calendar_date();
                date.year() == year && date.month() == month
            })
            .collect();
        in_month.sort_by(|a, b| {
            a.publish_date
                .unwrap_or(a.created_at)
                .cmp(&b.publish_date.unwrap_or(b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });

        for post in in_month {
            let index = post.calendar_date().day0() as usize;
            days[index].posts.push(post);
        }

        Ok(Self { year, month, days })
    }

    /// Posts on a given day of this month
    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        day.checked_sub(1).and_then(|i| self.days.get(i as usize))
    }

    /// Days that have at least one post
    pub fn busy_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| !d.posts.is_empty())
    }

    /// Total number of posts in the month
    pub fn post_count(&self) -> usize {
        self.days.iter().map(|d| d.posts.len()).sum()
    }
}

/// Posts whose calendar date is `date`
pub fn posts_on<'a>(date: NaiveDate, posts: impl IntoIterator<Item = &'a Post>) -> Vec<&'a Post> {
    posts
        .into_iter()
        .filter(|p| p.calendar_date() == date)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::NewPost;
    use crate::types::{PostId, UserId, WorkspaceId};
    use chrono::{TimeZone, Utc};

    fn post(id: u64, created: (u32, u32), publish: Option<(u32, u32)>) -> Post {
        let created_at = Utc
            .with_ymd_and_hms(2024, created.0, created.1, 8, 0, 0)
            .unwrap();
        let mut post = Post::from_new(
            PostId(id),
            NewPost::new(format!("Post {}", id), UserId(1), WorkspaceId(1)),
            created_at,
        );
        post.publish_date =
            publish.map(|(m, d)| Utc.with_ymd_and_hms(2024, m, d, 12, 0, 0).unwrap());
        post
    }

    #[test]
    fn test_month_has_every_day() {
        let feb = CalendarMonth::build(2024, 2, Vec::new()).unwrap();
        assert_eq!(feb.days.len(), 29);
        let apr = CalendarMonth::build(2024, 4, Vec::new()).unwrap();
        assert_eq!(apr.days.len(), 30);
        assert_eq!(apr.post_count(), 0);
    }

    #[test]
    fn test_publish_date_wins_over_created() {
        let posts = vec![
            post(1, (3, 1), Some((3, 15))),
            post(2, (3, 15), None),
            post(3, (2, 20), Some((3, 15))),
            post(4, (3, 2), Some((4, 1))),
        ];

        let march = CalendarMonth::build(2024, 3, posts).unwrap();
        let ides = march.day(15).unwrap();
        let ids: Vec<u64> = ides.posts.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(march.post_count(), 3);
        assert_eq!(march.busy_days().count(), 1);
        assert!(march.day(1).unwrap().posts.is_empty());
    }

    #[test]
    fn test_invalid_month() {
        assert!(CalendarMonth::build(2024, 13, Vec::new()).is_err());
        assert!(CalendarMonth::build(2024, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_posts_on() {
        let posts = vec![post(1, (5, 5), None), post(2, (5, 6), Some((5, 5)))];
        let date = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
        assert_eq!(posts_on(date, &posts).len(), 2);
    }
}
