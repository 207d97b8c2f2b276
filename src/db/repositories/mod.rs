mod company_repository;
mod document_repository;
mod placement_repository;
mod section_repository;
mod user_repository;

pub use company_repository::CompanyRepository;
pub use document_repository::DocumentRepository;
pub use placement_repository::PlacementRepository;
pub use section_repository::SectionRepository;
pub use user_repository::UserRepository;
