use super::{business, rank_desc, won_total};
use crate::core::calculator::safe_ratio;
use crate::models::{Client, Schedule};
use serde::Serialize;

/// How a schedule is tied to a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientAttribution {
    /// Only schedules carrying a client id count.
    #[default]
    Explicit,
    /// Legacy behaviour: a schedule without a client id is attributed by the
    /// first word of its title. An approximation, never the default.
    TitleFallback,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientRevenue {
    pub client_id: Option<i64>,
    pub name: String,
    pub schedule_count: usize,
    pub revenue: i64,
    pub average: i64,
}

#[derive(PartialEq)]
enum Key {
    Id(i64),
    Title(String),
}

fn title_key(title: &str) -> Option<String> {
    title.split_whitespace().next().map(str::to_string)
}

/// Revenue per client, highest first.
pub fn by_client<'a>(
    schedules: impl IntoIterator<Item = &'a Schedule>,
    clients: &[Client],
    attribution: ClientAttribution,
) -> Vec<ClientRevenue> {
    let mut groups: Vec<(Key, ClientRevenue)> = Vec::new();

    for s in business(schedules) {
        let key = match (s.client_id, attribution) {
            (Some(id), _) => Key::Id(id),
            (None, ClientAttribution::TitleFallback) => match title_key(&s.title) {
                // A first word equal to a known client's name joins that client.
                Some(word) => match clients.iter().find(|c| c.name == word) {
                    Some(c) => Key::Id(c.id),
                    None => Key::Title(word),
                },
                None => continue,
            },
            (None, ClientAttribution::Explicit) => continue,
        };

        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, row)) => {
                row.revenue = row.revenue.saturating_add(s.contract_amount);
                row.schedule_count += 1;
            }
            None => {
                let (client_id, name) = match &key {
                    Key::Id(id) => (
                        Some(*id),
                        clients
                            .iter()
                            .find(|c| c.id == *id)
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| format!("client #{id}")),
                    ),
                    Key::Title(word) => (None, word.clone()),
                };
                groups.push((
                    key,
                    ClientRevenue {
                        client_id,
                        name,
                        schedule_count: 1,
                        revenue: s.contract_amount,
                        average: 0,
                    },
                ));
            }
        }
    }

    let mut rows: Vec<ClientRevenue> = groups.into_iter().map(|(_, r)| r).collect();
    for row in &mut rows {
        row.average = safe_ratio(row.revenue as f64, row.schedule_count as f64).round() as i64;
    }

    rank_desc(&mut rows, |r| r.revenue);
    rows
}

/// Lifetime business revenue of one client, used to refresh
/// `clients.total_revenue`.
pub fn client_total_revenue(schedules: &[Schedule], client_id: i64) -> i64 {
    won_total(
        business(schedules)
            .filter(|s| s.client_id == Some(client_id))
            .map(|s| s.contract_amount),
    )
}
