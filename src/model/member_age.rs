use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone)]
pub struct JoinedMember {
    pub id: u64,
    pub display_name: String,
    pub username: String,
    pub joined_at: Option<DateTime<Utc>>,
    pub bot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
}

impl Default for Age {
    fn default() -> Self {
        Self {
            weeks: 0,
            days: 30,
            hours: 0,
        }
    }
}

impl Age {
    /// `None` if any part is negative or the total overflows.
    pub fn to_delta(self) -> Option<TimeDelta> {
        if self.weeks < 0 || self.days < 0 || self.hours < 0 {
            return None;
        }
        TimeDelta::try_weeks(self.weeks)?
            .checked_add(&TimeDelta::try_days(self.days)?)?
            .checked_add(&TimeDelta::try_hours(self.hours)?)
    }

    /// Short form used in headings and file names, e.g. `0w30d0h`.
    pub fn label(self) -> String {
        format!("{}w{}d{}h", self.weeks, self.days, self.hours)
    }
}

/// Non-bot members who joined at least `threshold` before `now`.
///
/// Members with an unknown join time are left out.
pub fn members_older_than(
    members: &[JoinedMember],
    now: DateTime<Utc>,
    threshold: TimeDelta,
) -> Vec<&JoinedMember> {
    members
        .iter()
        .filter(|member| !member.bot)
        .filter(|member| {
            member
                .joined_at
                .is_some_and(|joined_at| now - joined_at >= threshold)
        })
        .collect()
}

pub fn list_line(member: &JoinedMember) -> String {
    format!("- {}({})", member.display_name, member.username)
}

/// Newline separated ids, the content of the attached file.
pub fn id_file(members: &[&JoinedMember]) -> String {
    members
        .iter()
        .map(|member| member.id.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits lines into pages no longer than `max_len`, each starting with `heading`.
pub fn paginate_lines(heading: &str, lines: &[String], max_len: usize) -> Vec<String> {
    let mut pages = Vec::new();
    let mut page = String::from(heading);
    for line in lines {
        if page.len() + 1 + line.len() > max_len && page.len() > heading.len() {
            pages.push(std::mem::replace(&mut page, String::from(heading)));
        }
        page.push('\n');
        page.push_str(line);
    }
    pages.push(page);
    pages
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn member(
        id: u64,
        joined_days_ago: Option<i64>,
        bot: bool,
        now: DateTime<Utc>,
    ) -> JoinedMember {
        JoinedMember {
            id,
            display_name: format!("Member {id}"),
            username: format!("member{id}"),
            joined_at: joined_days_ago.map(|days| now - TimeDelta::days(days)),
            bot,
        }
    }

    #[test]
    fn default_age_is_thirty_days() {
        let age = Age::default();
        assert_eq!(age.to_delta(), Some(TimeDelta::days(30)));
        assert_eq!(age.label(), "0w30d0h");
    }

    #[test]
    fn age_parts_add_up() {
        let age = Age {
            weeks: 1,
            days: 2,
            hours: 3,
        };
        assert_eq!(
            age.to_delta(),
            Some(TimeDelta::days(9) + TimeDelta::hours(3))
        );
        assert_eq!(
            Age {
                weeks: -1,
                days: 0,
                hours: 0
            }
            .to_delta(),
            None
        );
    }

    #[test]
    fn selects_old_humans_only() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let members = vec![
            member(1, Some(40), false, now),
            member(2, Some(10), false, now),
            member(3, Some(90), true, now),
            member(4, None, false, now),
            member(5, Some(30), false, now),
        ];

        let selected = members_older_than(&members, now, TimeDelta::days(30));
        let ids: Vec<u64> = selected.iter().map(|member| member.id).collect();
        assert_eq!(ids, vec![1, 5]);
        assert_eq!(id_file(&selected), "1\n5");
        assert_eq!(list_line(selected[0]), "- Member 1(member1)");
    }

    #[test]
    fn pages_respect_the_length_limit() {
        let lines: Vec<String> = (0..50).map(|i| format!("- line number {i:02}")).collect();
        let pages = paginate_lines("### heading", &lines, 120);

        assert!(pages.len() > 1);
        for page in &pages {
            assert!(page.len() <= 120);
            assert!(page.starts_with("### heading"));
        }
        let joined: usize = pages.iter().map(|page| page.lines().count() - 1).sum();
        assert_eq!(joined, 50);
    }

    #[test]
    fn empty_list_is_one_page() {
        assert_eq!(paginate_lines("### heading", &[], 100), vec!["### heading"]);
    }
}
