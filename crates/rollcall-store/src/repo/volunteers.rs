use crate::error::{Result, StoreError};
use crate::kv::{KvStore, VOLUNTEERS_KEY};
use rollcall_core::domain::{normalize_email, NewVolunteer, Volunteer, VolunteerId};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Record store over the `volunteers` slot. Every mutation reloads the
/// snapshot, changes it, and writes the whole collection back.
pub struct VolunteersRepo<K: KvStore> {
    kv: K,
}

/// Snapshot entry as read back. Older snapshots carry no `id` and use the
/// `nome`/`endereco` keys.
#[derive(Debug, Deserialize)]
struct StoredVolunteer {
    #[serde(default)]
    id: Option<VolunteerId>,
    #[serde(alias = "nome")]
    name: String,
    email: String,
    #[serde(default, alias = "endereco")]
    address: Option<String>,
}

struct Snapshot {
    records: Vec<Volunteer>,
    upgraded: bool,
}

impl<K: KvStore> VolunteersRepo<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Returns the collection in insertion order. A missing or unreadable
    /// snapshot yields an empty list.
    pub fn load_all(&self) -> Result<Vec<Volunteer>> {
        let snapshot = read_snapshot(&self.kv)?;
        if snapshot.upgraded {
            debug!(count = snapshot.records.len(), "assigned ids to legacy snapshot");
            write_snapshot(&self.kv, &snapshot.records)?;
        }
        Ok(snapshot.records)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(read_snapshot(&self.kv)?.records.len())
    }

    /// Replaces the whole collection. Rejects input that would break email
    /// uniqueness.
    pub fn save_all(&self, records: &[Volunteer]) -> Result<()> {
        ensure_unique_emails(records)?;
        write_snapshot(&self.kv, records)
    }

    pub fn append(&self, new: NewVolunteer) -> Result<Volunteer> {
        new.validate()?;
        self.kv.transact(|kv| {
            let mut records = read_snapshot(kv)?.records;
            if let Some(key) = normalize_email(&new.email) {
                if records
                    .iter()
                    .any(|existing| existing.normalized_email().as_deref() == Some(key.as_str()))
                {
                    return Err(StoreError::DuplicateEmail(new.email.clone()));
                }
            }
            let volunteer = Volunteer::from_new(VolunteerId::new(), new);
            records.push(volunteer.clone());
            write_snapshot(kv, &records)?;
            debug!(id = %volunteer.id, count = records.len(), "volunteer appended");
            Ok(volunteer)
        })
    }

    /// Removes the record at `index`. Out-of-range positions change nothing.
    pub fn remove_at(&self, index: usize) -> Result<Option<Volunteer>> {
        self.kv.transact(|kv| {
            let mut records = read_snapshot(kv)?.records;
            if index >= records.len() {
                return Ok(None);
            }
            let removed = records.remove(index);
            write_snapshot(kv, &records)?;
            Ok(Some(removed))
        })
    }

    pub fn remove_by_id(&self, id: VolunteerId) -> Result<Option<Volunteer>> {
        self.kv.transact(|kv| {
            let mut records = read_snapshot(kv)?.records;
            let Some(index) = records.iter().position(|volunteer| volunteer.id == id) else {
                return Ok(None);
            };
            let removed = records.remove(index);
            write_snapshot(kv, &records)?;
            Ok(Some(removed))
        })
    }

    pub fn clear_all(&self) -> Result<()> {
        self.kv.remove(VOLUNTEERS_KEY)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Volunteer>> {
        let Some(key) = normalize_email(email) else {
            return Ok(None);
        };
        Ok(read_snapshot(&self.kv)?
            .records
            .into_iter()
            .find(|volunteer| volunteer.normalized_email().as_deref() == Some(key.as_str())))
    }
}

fn read_snapshot<K: KvStore>(kv: &K) -> Result<Snapshot> {
    let Some(raw) = kv.get(VOLUNTEERS_KEY)? else {
        return Ok(Snapshot {
            records: Vec::new(),
            upgraded: false,
        });
    };

    let stored: Vec<StoredVolunteer> = match serde_json::from_str(&raw) {
        Ok(stored) => stored,
        Err(err) => {
            warn!(error = %err, "volunteer snapshot unreadable, treating as empty");
            return Ok(Snapshot {
                records: Vec::new(),
                upgraded: false,
            });
        }
    };

    let mut upgraded = false;
    let records = stored
        .into_iter()
        .map(|entry| {
            let id = entry.id.unwrap_or_else(|| {
                upgraded = true;
                VolunteerId::new()
            });
            Volunteer {
                id,
                name: entry.name,
                email: entry.email,
                address: entry.address.unwrap_or_default(),
            }
        })
        .collect();

    Ok(Snapshot { records, upgraded })
}

fn write_snapshot<K: KvStore>(kv: &K, records: &[Volunteer]) -> Result<()> {
    let encoded = serde_json::to_string(records)?;
    kv.set(VOLUNTEERS_KEY, &encoded)
}

fn ensure_unique_emails(records: &[Volunteer]) -> Result<()> {
    let mut seen = HashSet::new();
    for volunteer in records {
        if let Some(key) = volunteer.normalized_email() {
            if !seen.insert(key) {
                return Err(StoreError::DuplicateEmail(volunteer.email.clone()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::VolunteersRepo;
    use crate::kv::{KvStore, MemorySlots, VOLUNTEERS_KEY};
    use rollcall_core::domain::NewVolunteer;

    fn new_volunteer(name: &str, email: &str) -> NewVolunteer {
        NewVolunteer {
            name: name.to_string(),
            email: email.to_string(),
            address: "Praça da Sé, Sé, São Paulo - SP".to_string(),
        }
    }

    #[test]
    fn corrupt_snapshot_reads_as_empty() {
        let slots = MemorySlots::new();
        slots.set(VOLUNTEERS_KEY, "{not json").expect("set");
        let repo = VolunteersRepo::new(&slots);
        assert!(repo.load_all().expect("load").is_empty());
    }

    #[test]
    fn empty_and_null_snapshots_read_as_empty() {
        let slots = MemorySlots::new();
        slots.set(VOLUNTEERS_KEY, "[]").expect("set");
        let repo = VolunteersRepo::new(&slots);
        assert!(repo.load_all().expect("load").is_empty());

        slots.set(VOLUNTEERS_KEY, "null").expect("set");
        assert!(repo.load_all().expect("load").is_empty());
    }

    #[test]
    fn legacy_snapshot_gets_stable_ids() {
        let slots = MemorySlots::new();
        slots
            .set(
                VOLUNTEERS_KEY,
                r#"[{"nome":"Ana","email":"ana@x.com","endereco":"Praça da Sé, Sé, São Paulo - SP"}]"#,
            )
            .expect("set");
        let repo = VolunteersRepo::new(&slots);

        let first = repo.load_all().expect("load");
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name, "Ana");
        assert_eq!(first[0].address, "Praça da Sé, Sé, São Paulo - SP");

        let second = repo.load_all().expect("load");
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn failed_append_leaves_snapshot_untouched() {
        let slots = MemorySlots::new();
        let repo = VolunteersRepo::new(&slots);
        repo.append(new_volunteer("Ana", "ana@x.com")).expect("append");
        let before = slots.get(VOLUNTEERS_KEY).expect("get");

        assert!(repo.append(new_volunteer("Ana 2", "ANA@x.com")).is_err());
        assert_eq!(slots.get(VOLUNTEERS_KEY).expect("get"), before);
    }
}
