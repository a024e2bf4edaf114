// src/catalog.rs
//! Public listing cards

use serde::{Deserialize, Serialize};

use crate::types::models::Job;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i64,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub deadline: String,
    pub image_url: String,
}

impl From<&Job> for JobListing {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            department: job.department.clone(),
            location: job.campus.clone(),
            job_type: job.job_type.label().to_string(),
            deadline: job.application_deadline.clone(),
            image_url: job.image_url.clone().unwrap_or_default(),
        }
    }
}

pub fn listings_from_jobs(jobs: &[Job]) -> Vec<JobListing> {
    jobs.iter().map(JobListing::from).collect()
}

fn listing(
    id: i64,
    title: &str,
    department: &str,
    location: &str,
    job_type: &str,
    deadline: &str,
    image_url: &str,
) -> JobListing {
    JobListing {
        id,
        title: title.to_string(),
        department: department.to_string(),
        location: location.to_string(),
        job_type: job_type.to_string(),
        deadline: deadline.to_string(),
        image_url: image_url.to_string(),
    }
}

/// Fixed catalog shown when the listing page runs without a backend
pub fn sample_listings() -> Vec<JobListing> {
    vec![
        listing(
            1,
            "Junior Research Fellow (JRF)",
            "Computer Science",
            "Bhubaneswar Campus",
            "Full-time",
            "June 30, 2025",
            "https://www.dbtjrf.gov.in/dbtJRFSlideshow/img3.jpg",
        ),
        listing(
            2,
            "Assistant Professor",
            "Mechanical Engineering",
            "Paralakhemundi Campus",
            "Full-time",
            "July 15, 2025",
            "https://images.unsplash.com/photo-1581092918056-0c4c3acd3789?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        ),
        listing(
            3,
            "Lab Assistant",
            "Biotechnology",
            "Vizianagaram Campus",
            "Part-time",
            "June 25, 2025",
            "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcR96mBvgDEAMplNeLH0iEyo6v8sUvbSyWhJ-Q&s",
        ),
        listing(
            4,
            "Research Associate",
            "Physics",
            "Bhubaneswar Campus",
            "Full-time",
            "July 20, 2025",
            "https://images.unsplash.com/photo-1532094349884-543bc11b234d?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        ),
        listing(
            5,
            "Teaching Assistant",
            "Mathematics",
            "Paralakhemundi Campus",
            "Part-time",
            "June 28, 2025",
            "https://images.unsplash.com/photo-1509062522246-3755977927d7?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        ),
        listing(
            6,
            "Senior Professor",
            "Chemistry",
            "Vizianagaram Campus",
            "Full-time",
            "July 10, 2025",
            "https://images.unsplash.com/photo-1532187863486-abf9dbad1b69?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        ),
        listing(
            7,
            "Research Scientist",
            "Biotechnology",
            "Bhubaneswar Campus",
            "Full-time",
            "July 25, 2025",
            "https://images.unsplash.com/photo-1532092367458-62dd322becf5?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        ),
        listing(
            8,
            "Administrative Assistant",
            "Administration",
            "Paralakhemundi Campus",
            "Part-time",
            "June 22, 2025",
            "https://images.unsplash.com/photo-1497215728101-856f4ea42174?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        ),
        listing(
            9,
            "Librarian",
            "Library Science",
            "Vizianagaram Campus",
            "Full-time",
            "July 5, 2025",
            "https://images.unsplash.com/photo-1507842217343-583bb7270b66?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        ),
    ]
}
