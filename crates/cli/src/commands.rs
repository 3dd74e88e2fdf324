//! Subcommand handlers.
//!
//! A [`Session`] owns the catalog service and the search history for one
//! invocation. History is loaded on start and written back on finish, only
//! when a search was recorded.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use abb_core::item_id::item_id_from_href;
use abb_core::{
    magnet_uri, CatalogService, Config, DetailRecord, ExtractionCache, MagnetLauncher,
    PageFetcher, RecentSearches, SummaryRecord,
};

use crate::cli::Commands;

pub struct Session {
    catalog: CatalogService,
    recent: RecentSearches,
    launcher: MagnetLauncher,
    recent_limit: usize,
    searched: bool,
}

impl Session {
    pub async fn start(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        cache: ExtractionCache,
    ) -> Result<Self> {
        let recent = RecentSearches::load(&cache)
            .await
            .context("Failed to load recent searches")?;

        Ok(Self {
            catalog: CatalogService::new(config, fetcher, cache),
            recent,
            launcher: MagnetLauncher::new(config.launcher.command.clone()),
            recent_limit: config.session.recent_limit,
            searched: false,
        })
    }

    pub async fn execute<W: Write>(&mut self, command: &Commands, out: &mut W) -> Result<()> {
        match command {
            Commands::Search(args) => {
                // History is kept even when the search itself fails.
                self.searched = true;
                let records = self.catalog.search(&args.query(), &mut self.recent).await?;
                if args.json {
                    serde_json::to_writer_pretty(&mut *out, &records)?;
                    writeln!(out)?;
                } else {
                    for record in &records {
                        writeln!(out, "{}", summary_line(record))?;
                    }
                }
                info!("{} results", records.len());
            }
            Commands::Show(args) => {
                let id = item_id_from_href(&args.id);
                let record = self.catalog.book(&id).await?;
                write_detail(out, &record, &self.catalog.item_url(&id), args.description)?;
            }
            Commands::Magnet(args) => {
                let record = self.catalog.book(&item_id_from_href(&args.id)).await?;
                writeln!(out, "{}", checked_magnet(&record)?)?;
            }
            Commands::Launch(args) => {
                let record = self.catalog.book(&item_id_from_href(&args.id)).await?;
                self.launcher.launch(&checked_magnet(&record)?).await?;
            }
            Commands::Recent => {
                for search in self.recent.display(self.recent_limit) {
                    writeln!(out, "{}", search)?;
                }
            }
            Commands::ClearCache => {
                let evicted = self.catalog.clear_cache().await?;
                self.recent = RecentSearches::default();
                self.searched = false;
                writeln!(out, "Removed {} cached entries", evicted)?;
            }
        }
        Ok(())
    }

    /// Persist the search history if this session added to it.
    pub async fn finish(self) -> Result<()> {
        if self.searched {
            self.recent
                .save(self.catalog.cache())
                .await
                .context("Failed to save recent searches")?;
        }
        Ok(())
    }
}

fn checked_magnet(record: &DetailRecord) -> Result<String> {
    if record.torrent.hash.is_empty() {
        bail!("No info hash found for \"{}\"", record.title);
    }
    Ok(magnet_uri(record))
}

fn summary_line(record: &SummaryRecord) -> String {
    let size = match &record.info.size_unit {
        Some(unit) => format!("{} {}", record.info.size, unit),
        None => record.info.size.clone(),
    };
    format!(
        "{}\t{}\t[{} | {} {} | {}]",
        record.url, record.title, record.lang, record.info.format, record.info.unit, size
    )
}

fn write_detail<W: Write>(
    out: &mut W,
    record: &DetailRecord,
    url: &str,
    with_description: bool,
) -> Result<()> {
    writeln!(out, "{}", record.title)?;
    writeln!(out, "  Author:    {}", record.author)?;
    writeln!(out, "  Narrator:  {}", record.narrator)?;
    writeln!(out, "  Abridged:  {}", record.abridged)?;
    writeln!(out, "  Language:  {}", record.language)?;
    writeln!(out, "  Category:  {}", record.category.join(", "))?;
    writeln!(
        out,
        "  Audio:     {} {}",
        record.specs.format, record.specs.bitrate
    )?;
    writeln!(out, "  Size:      {}", record.torrent.size)?;
    writeln!(out, "  Hash:      {}", record.torrent.hash)?;
    writeln!(out, "  Trackers:  {}", record.torrent.trackers.len())?;
    writeln!(out, "  Link:      {}", url)?;

    if !record.related.is_empty() {
        writeln!(out, "  Related:")?;
        for item in &record.related {
            writeln!(out, "    {}\t{}", item.url, item.title)?;
        }
    }

    if with_description && !record.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", record.description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ItemArgs, SearchArgs, ShowArgs};
    use abb_core::testing::fixtures::{self, DetailPage, ListingEntry};
    use abb_core::testing::MockPageFetcher;
    use abb_core::{FetchError, MemoryCacheStore};

    struct Harness {
        fetcher: MockPageFetcher,
        cache: ExtractionCache,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                fetcher: MockPageFetcher::new(),
                cache: ExtractionCache::new(Arc::new(MemoryCacheStore::new())),
            }
        }

        async fn session(&self) -> Session {
            Session::start(
                &Config::default(),
                Arc::new(self.fetcher.clone()),
                self.cache.clone(),
            )
            .await
            .unwrap()
        }

        async fn run(&self, session: &mut Session, command: Commands) -> String {
            let mut out = Vec::new();
            session.execute(&command, &mut out).await.unwrap();
            String::from_utf8(out).unwrap()
        }
    }

    fn search(text: &str, json: bool) -> Commands {
        Commands::Search(SearchArgs {
            text: vec![text.to_string()],
            json,
        })
    }

    #[tokio::test]
    async fn test_search_prints_one_line_per_record() {
        let harness = Harness::new();
        harness
            .fetcher
            .set_page(
                "/page/1/",
                fixtures::listing_page(
                    &[ListingEntry::new("Dune", "dune"), ListingEntry::new("Emma", "emma")],
                    None,
                ),
            )
            .await;
        let mut session = harness.session().await;

        let output = harness.run(&mut session, search("dune", false)).await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("dune\tDune\t"));
        assert!(lines[0].contains("500 MBs"));
    }

    #[tokio::test]
    async fn test_search_json_output() {
        let harness = Harness::new();
        harness
            .fetcher
            .set_page(
                "/page/1/",
                fixtures::listing_page(&[ListingEntry::new("Dune", "dune")], None),
            )
            .await;
        let mut session = harness.session().await;

        let output = harness.run(&mut session, search("dune", true)).await;
        let records: Vec<SummaryRecord> = serde_json::from_str(&output).unwrap();
        assert_eq!(records[0].url, "dune");
        assert!(output.contains("\"sizeUnit\""));
    }

    #[tokio::test]
    async fn test_history_persists_across_sessions() {
        let harness = Harness::new();
        harness
            .fetcher
            .set_page("/page/1/", fixtures::not_found_page())
            .await;

        let mut session = harness.session().await;
        harness.run(&mut session, search("dune", false)).await;
        harness.run(&mut session, search("emma", false)).await;
        harness.run(&mut session, search("dune", false)).await;
        session.finish().await.unwrap();

        let mut session = harness.session().await;
        let output = harness.run(&mut session, Commands::Recent).await;
        assert_eq!(output, "emma\ndune\n");
    }

    #[tokio::test]
    async fn test_failed_search_is_still_recorded() {
        let harness = Harness::new();
        harness
            .fetcher
            .set_failure("/page/1/", FetchError::Connection("refused".into()))
            .await;

        let mut session = harness.session().await;
        let mut out = Vec::new();
        assert!(session.execute(&search("dune", false), &mut out).await.is_err());
        session.finish().await.unwrap();

        let mut session = harness.session().await;
        let output = harness.run(&mut session, Commands::Recent).await;
        assert_eq!(output, "dune\n");
    }

    #[tokio::test]
    async fn test_clear_cache_drops_history() {
        let harness = Harness::new();
        harness
            .fetcher
            .set_page("/page/1/", fixtures::not_found_page())
            .await;

        let mut session = harness.session().await;
        harness.run(&mut session, search("dune", false)).await;
        session.finish().await.unwrap();

        let mut session = harness.session().await;
        let output = harness.run(&mut session, Commands::ClearCache).await;
        assert_eq!(output, "Removed 1 cached entries\n");
        session.finish().await.unwrap();

        assert!(harness.cache.recent_searches().await.unwrap().is_empty());
        assert!(harness.cache.last_search().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_show_and_magnet() {
        let harness = Harness::new();
        let mut page = DetailPage::new("Dune");
        page.hash = "abc123".into();
        page.trackers = vec!["udp://tracker.one:1337/announce".into()];
        harness
            .fetcher
            .set_page("/audio-books/dune/", fixtures::detail_page(&page))
            .await;
        let mut session = harness.session().await;

        let shown = harness
            .run(
                &mut session,
                Commands::Show(ShowArgs {
                    id: "/audio-books/dune/".into(),
                    description: true,
                }),
            )
            .await;
        assert!(shown.starts_with("Dune\n"));
        assert!(shown.contains("Link:      http://audiobookbay.fi/audio-books/dune/"));
        assert!(shown.ends_with("A desert planet.\n"));

        let magnet = harness
            .run(&mut session, Commands::Magnet(ItemArgs { id: "dune".into() }))
            .await;
        assert_eq!(
            magnet,
            "magnet:?xt=urn:btih:abc123&dn=Dune&tr=udp%3A%2F%2Ftracker.one%3A1337%2Fannounce\n"
        );
        assert_eq!(harness.fetcher.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_magnet_without_hash_is_an_error() {
        let harness = Harness::new();
        harness
            .fetcher
            .set_page("/audio-books/dune/", "<html><body></body></html>")
            .await;
        let mut session = harness.session().await;

        let mut out = Vec::new();
        let err = session
            .execute(&Commands::Magnet(ItemArgs { id: "dune".into() }), &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No info hash"));
    }
}
