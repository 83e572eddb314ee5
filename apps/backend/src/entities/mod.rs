pub mod decisions;
pub mod groups;
pub mod participants;
pub mod players;
pub mod sessions;
pub mod subsessions;
pub mod users;

pub use decisions::Entity as Decisions;
pub use decisions::Model as Decision;
pub use groups::Entity as Groups;
pub use groups::Model as Group;
pub use participants::Entity as Participants;
pub use participants::Model as Participant;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use sessions::Entity as Sessions;
pub use sessions::Model as Session;
pub use subsessions::Entity as Subsessions;
pub use subsessions::Model as Subsession;
pub use users::Entity as Users;
pub use users::Model as User;
