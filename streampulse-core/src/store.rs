//! Single owned application state.
//!
//! Views receive `&AppStore` to read and go through the mutators below to
//! change anything; nothing else holds catalog or subscriber state.

use chrono::NaiveDate;
use log::{debug, info};
use streampulse_model::{
    AdConfig, CategoryCount, EmailTemplate, Movie, MovieID, Subscriber,
    SubscriberID, SubscriptionStatus, TrustedMarkup, subscriber::normalize_email,
};

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Default)]
pub struct AppStore {
    movies: Vec<Movie>,
    subscribers: Vec<Subscriber>,
    ads: AdConfig,
    templates: Vec<EmailTemplate>,
}

impl AppStore {
    pub fn new(
        movies: Vec<Movie>,
        subscribers: Vec<Subscriber>,
        ads: AdConfig,
    ) -> Self {
        Self {
            movies,
            subscribers,
            ads,
            templates: Vec::new(),
        }
    }

    pub fn with_templates(mut self, templates: Vec<EmailTemplate>) -> Self {
        self.templates = templates;
        self
    }

    // Catalog

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn movie(&self, id: MovieID) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    /// Titles containing `query`, ignoring case. An empty query matches
    /// everything.
    pub fn search_movies(&self, query: &str) -> Vec<&Movie> {
        let query = query.trim().to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&query))
            .collect()
    }

    /// Hero pick: the first featured movie, else the first in the catalog.
    pub fn featured_movie(&self) -> Option<&Movie> {
        self.movies
            .iter()
            .find(|movie| movie.featured)
            .or_else(|| self.movies.first())
    }

    /// Make `id` the only featured movie.
    pub fn set_featured(&mut self, id: MovieID) -> Result<()> {
        if self.movie(id).is_none() {
            return Err(StoreError::MovieNotFound(id));
        }
        for movie in &mut self.movies {
            movie.featured = movie.id == id;
        }
        info!("[Store] featured movie set to {id}");
        Ok(())
    }

    /// New movies go to the front of the catalog.
    pub fn add_movie(&mut self, movie: Movie) -> Result<MovieID> {
        movie.validate()?;
        if self.movie(movie.id).is_some() {
            return Err(StoreError::DuplicateMovie(movie.id));
        }
        let id = movie.id;
        debug!("[Store] adding movie '{}' ({id})", movie.title);
        self.movies.insert(0, movie);
        Ok(id)
    }

    pub fn delete_movie(&mut self, id: MovieID) -> Result<Movie> {
        let index = self
            .movies
            .iter()
            .position(|movie| movie.id == id)
            .ok_or(StoreError::MovieNotFound(id))?;
        let removed = self.movies.remove(index);
        debug!("[Store] deleted movie '{}' ({id})", removed.title);
        Ok(removed)
    }

    pub fn trending(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter().filter(|movie| movie.trending)
    }

    pub fn movies_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Movie> + 'a {
        self.movies
            .iter()
            .filter(move |movie| movie.category.eq_ignore_ascii_case(category))
    }

    /// Movie count per category, in order of first appearance.
    pub fn category_rollup(&self) -> Vec<CategoryCount> {
        let mut rollup: Vec<CategoryCount> = Vec::new();
        for movie in &self.movies {
            match rollup
                .iter_mut()
                .find(|entry| entry.name.eq_ignore_ascii_case(&movie.category))
            {
                Some(entry) => entry.movie_count += 1,
                None => rollup.push(CategoryCount {
                    name: movie.category.clone(),
                    movie_count: 1,
                }),
            }
        }
        rollup
    }

    // Subscribers

    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    /// Subscribers whose address contains `query`, ignoring case.
    pub fn search_subscribers(&self, query: &str) -> Vec<&Subscriber> {
        let query = query.trim().to_lowercase();
        self.subscribers
            .iter()
            .filter(|subscriber| subscriber.email.contains(&query))
            .collect()
    }

    pub fn active_subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|s| s.is_active()).count()
    }

    /// Add `email` to the newsletter list.
    ///
    /// Returns `Ok(None)` when the address is already known, whatever its
    /// status.
    pub fn subscribe(
        &mut self,
        email: &str,
        today: NaiveDate,
    ) -> Result<Option<SubscriberID>> {
        let email = normalize_email(email)?;
        if self.subscribers.iter().any(|s| s.email == email) {
            debug!("[Store] {email} is already subscribed");
            return Ok(None);
        }
        let subscriber = Subscriber::new(&email, today)?;
        let id = subscriber.id;
        self.subscribers.insert(0, subscriber);
        info!("[Store] new subscriber {id}");
        Ok(Some(id))
    }

    /// [`AppStore::subscribe`] stamped with the local date.
    pub fn subscribe_today(
        &mut self,
        email: &str,
    ) -> Result<Option<SubscriberID>> {
        self.subscribe(email, chrono::Local::now().date_naive())
    }

    pub fn unsubscribe(&mut self, id: SubscriberID) -> Result<()> {
        let subscriber = self
            .subscribers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::SubscriberNotFound(id))?;
        subscriber.status = SubscriptionStatus::Unsubscribed;
        Ok(())
    }

    // Newsletter templates

    pub fn templates(&self) -> &[EmailTemplate] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&EmailTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Replace the stored template with the same id.
    pub fn save_template(&mut self, template: EmailTemplate) -> Result<()> {
        let slot = self
            .templates
            .iter_mut()
            .find(|existing| existing.id == template.id)
            .ok_or_else(|| StoreError::TemplateNotFound(template.id.clone()))?;
        info!("[Store] template {} saved", template.id);
        *slot = template;
        Ok(())
    }

    // Ad zones

    pub fn ad_config(&self) -> &AdConfig {
        &self.ads
    }

    /// Flip a zone on or off; returns the new state.
    pub fn toggle_ad_zone(&mut self, zone_id: &str) -> Result<bool> {
        let zone = self
            .ads
            .zone_mut(zone_id)
            .ok_or_else(|| StoreError::AdZoneNotFound(zone_id.to_string()))?;
        zone.enabled = !zone.enabled;
        info!(
            "[Store] ad zone {zone_id} {}",
            if zone.enabled { "enabled" } else { "disabled" }
        );
        Ok(zone.enabled)
    }

    pub fn set_ad_zone_code(
        &mut self,
        zone_id: &str,
        code: impl Into<String>,
    ) -> Result<()> {
        let zone = self
            .ads
            .zone_mut(zone_id)
            .ok_or_else(|| StoreError::AdZoneNotFound(zone_id.to_string()))?;
        zone.code = code.into();
        Ok(())
    }

    /// Payload for the player's pause overlay, if one is live.
    pub fn video_overlay(&self) -> Option<TrustedMarkup> {
        self.ads.video_overlay()
    }
}
