//! Plain-text rendering of listings, buckets and shortlists.

use crate::api::participants::Recommendation;
use crate::models::participant::{Participant, ReviewStatus};
use crate::models::posting::{Posting, PostingRef};
use crate::models::user::{Company, Profile};
use crate::review::partition::Buckets;

pub fn print_buckets(posting: &PostingRef, buckets: &Buckets) {
    println!("Review board for {posting}");
    print_bucket(ReviewStatus::Pending, &buckets.pending);
    print_bucket(ReviewStatus::Accepted, &buckets.accepted);
    print_bucket(ReviewStatus::Rejected, &buckets.rejected);
}

fn print_bucket(status: ReviewStatus, list: &[Participant]) {
    println!("\n  {status} ({})", list.len());
    if list.is_empty() {
        println!("    (none)");
        return;
    }
    for p in list {
        println!("    {}  {} <{}>", p.id, p.user.name, p.user.email);
    }
}

pub fn print_postings(postings: &[Posting]) {
    if postings.is_empty() {
        println!("(no postings)");
        return;
    }
    for posting in postings {
        println!(
            "{}  {}  {}",
            posting.id,
            posting.title,
            posting.location.as_deref().unwrap_or("-")
        );
    }
}

pub fn print_posting(posting: &Posting) {
    println!("{}", posting.title);
    if let Some(location) = &posting.location {
        println!("location: {location}");
    }
    println!("posted:   {}", posting.created_at.format("%Y-%m-%d"));
    println!("\n{}", posting.description);
}

pub fn print_recommendations(entries: &[Recommendation]) {
    if entries.is_empty() {
        println!("(empty shortlist)");
        return;
    }
    println!("Top matches:");
    for (rank, entry) in entries.iter().enumerate() {
        println!("  {}. {} — {}/100", rank + 1, entry.title, entry.match_score);
        if !entry.justification.is_empty() {
            println!("     {}", entry.justification);
        }
    }
}

pub fn print_profile(profile: &Profile) {
    println!("{} <{}> ({})", profile.name, profile.email, profile.role);
    if let Some(bio) = &profile.bio {
        println!("{bio}");
    }
}

pub fn print_company(company: &Company) {
    println!("{} <{}>", company.name, company.email);
    if let Some(website) = &company.website {
        println!("{website}");
    }
    if let Some(description) = &company.description {
        println!("{description}");
    }
}
