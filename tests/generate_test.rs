//! End-to-end generator tests against a throwaway ABP solution.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use abp_helper::commands::{self, CommandRunner};
use abp_helper::config::Config;
use abp_helper::errors::{AppError, AppResult};
use abp_helper::generator::TemplateStore;
use abp_helper::workflow::variables::WRITTEN_FILES;
use abp_helper::workflow::DefaultPipelineBuilderFactory;

const BOOK: &str = r#"using System;
using Volo.Abp.Domain.Entities.Auditing;
using Volo.Abp.MultiTenancy;

namespace Acme.BookStore.Books
{
    public class Book : FullAuditedAggregateRoot<Guid>, IMultiTenant
    {
        public Guid? TenantId { get; set; }

        public string Name { get; set; }

        public float Price { get; set; }
    }
}
"#;

const BOOK_SERVICE: &str = r#"using System;
using System.Collections.Generic;
using System.Threading.Tasks;
using Volo.Abp.Application.Dtos;
using Volo.Abp.Application.Services;

namespace Acme.BookStore.Books
{
    public interface IBookAppService : IApplicationService
    {
        Task<BookDto> GetAsync(Guid id);

        Task<PagedResultDto<BookDto>> GetListAsync(PagedAndSortedResultRequestDto input);

        Task<BookDto> UpdateAsync(Guid id, CreateUpdateBookDto input);

        Task DeleteAsync(Guid id);

        Task<List<AuthorDto>> GetAuthorsAsync(Guid id, Guid publisherId);
    }
}
"#;

/// `src/Acme.BookStore.<Layer>/` projects plus a test project to exclude
fn solution() -> TempDir {
    let dir = TempDir::new().unwrap();
    for layer in ["Domain", "Application.Contracts", "Application", "HttpApi"] {
        let project = format!("Acme.BookStore.{layer}");
        write(dir.path(), &format!("src/{project}/{project}.csproj"), "<Project />");
    }
    write(dir.path(), "src/Acme.BookStore.Domain/Books/Book.cs", BOOK);
    write(
        dir.path(),
        "src/Acme.BookStore.Application.Contracts/Books/IBookAppService.cs",
        BOOK_SERVICE,
    );
    write(
        dir.path(),
        "test/Acme.BookStore.Tests/Books/Book.cs",
        "namespace Acme.BookStore.Tests { public class Book { } }",
    );
    dir
}

fn write(base: &Path, relative: &str, content: &str) {
    let path = base.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(base: &Path, relative: &str) -> String {
    fs::read_to_string(base.join(relative)).unwrap()
}

fn runner() -> CommandRunner {
    let factory = DefaultPipelineBuilderFactory::new(Arc::new(TemplateStore::embedded()));
    CommandRunner::new(Arc::new(factory), Config::default())
}

async fn generate(args: &[&str]) -> AppResult<Vec<PathBuf>> {
    let matches = commands::generate::command()?.try_get_matches_from(
        std::iter::once("generate").chain(args.iter().copied()),
    )?;
    let ctx = commands::generate::execute(&matches, &runner()).await?;
    ctx.get(&WRITTEN_FILES)
}

#[tokio::test]
async fn test_crud_generates_dtos_service_and_controller() {
    let dir = solution();
    let base = dir.path().to_string_lossy().into_owned();

    let written = generate(&["crud", "Book", "-d", &base, "--exclude", "test/**"])
        .await
        .unwrap();
    assert_eq!(written.len(), 5);

    let contracts = "src/Acme.BookStore.Application.Contracts/Books";
    let dto = read(dir.path(), &format!("{contracts}/Dtos/BookDto.cs"));
    assert!(dto.contains("namespace Acme.BookStore.Books.Dtos"));
    assert!(dto.contains("public class BookDto : FullAuditedEntityDto<Guid>"));
    assert!(dto.contains("public string Name { get; set; }"));
    assert!(dto.contains("public float Price { get; set; }"));
    assert!(!dto.contains("TenantId"));

    let input = read(dir.path(), &format!("{contracts}/Dtos/CreateUpdateBookDto.cs"));
    assert!(input.contains("public class CreateUpdateBookDto"));

    let contract = read(dir.path(), &format!("{contracts}/IBookAppService.cs"));
    assert!(contract.contains("public interface IBookAppService"));
    assert!(contract.contains("CreateUpdateBookDto>"));

    let service = read(
        dir.path(),
        "src/Acme.BookStore.Application/Books/BookAppService.cs",
    );
    assert!(service.contains("IRepository<Book, Guid> repository"));

    let controller = read(
        dir.path(),
        "src/Acme.BookStore.HttpApi/Controllers/Books/BookController.cs",
    );
    assert!(controller.contains("[Route(\"api/app/book\")]"));
    assert!(controller.contains("public class BookController : BookStoreController, IBookAppService"));
}

#[tokio::test]
async fn test_crud_with_separate_dto_and_no_controller() {
    let dir = solution();
    let base = dir.path().to_string_lossy().into_owned();

    let written = generate(&["crud", "Book", "-d", &base, "--separate-dto", "--skip-controller"])
        .await
        .unwrap();
    assert_eq!(written.len(), 5);

    let dtos = dir
        .path()
        .join("src/Acme.BookStore.Application.Contracts/Books/Dtos");
    assert!(dtos.join("CreateBookDto.cs").is_file());
    assert!(dtos.join("UpdateBookDto.cs").is_file());
    assert!(!dtos.join("CreateUpdateBookDto.cs").exists());
    assert!(!dir.path().join("src/Acme.BookStore.HttpApi/Controllers").exists());

    let service = read(
        dir.path(),
        "src/Acme.BookStore.Application/Books/BookAppService.cs",
    );
    assert!(service.contains("CreateBookDto, UpdateBookDto>"));
}

#[tokio::test]
async fn test_no_overwrite_keeps_existing_files() {
    let dir = solution();
    let base = dir.path().to_string_lossy().into_owned();
    let existing = "src/Acme.BookStore.Application.Contracts/Books/Dtos/BookDto.cs";
    write(dir.path(), existing, "// hand written");

    let written = generate(&["crud", "Book", "-d", &base, "--no-overwrite"])
        .await
        .unwrap();

    assert_eq!(read(dir.path(), existing), "// hand written");
    assert!(!written.contains(&dir.path().join(existing)));
    assert_eq!(written.len(), 4);

    generate(&["crud", "Book", "-d", &base]).await.unwrap();
    assert_ne!(read(dir.path(), existing), "// hand written");
}

#[tokio::test]
async fn test_service_in_folder() {
    let dir = solution();
    let base = dir.path().to_string_lossy().into_owned();

    generate(&["service", "Project", "-f", "Projects", "-d", &base])
        .await
        .unwrap();

    let contract = read(
        dir.path(),
        "src/Acme.BookStore.Application.Contracts/Projects/IProjectAppService.cs",
    );
    assert!(contract.contains("namespace Acme.BookStore.Projects"));
    assert!(contract.contains("public interface IProjectAppService : IApplicationService"));

    let service = read(
        dir.path(),
        "src/Acme.BookStore.Application/Projects/ProjectAppService.cs",
    );
    assert!(service.contains("public class ProjectAppService : BookStoreAppService, IProjectAppService"));
}

#[tokio::test]
async fn test_controller_routes_follow_conventions() {
    let dir = solution();
    let base = dir.path().to_string_lossy().into_owned();

    generate(&["controller", "IBookAppService", "-d", &base])
        .await
        .unwrap();

    let controller = read(
        dir.path(),
        "src/Acme.BookStore.HttpApi/Controllers/Books/BookController.cs",
    );
    assert!(controller.contains("[HttpGet]\n        [Route(\"{id}\")]\n        public virtual Task<BookDto> GetAsync(Guid id)"));
    assert!(controller.contains("[HttpGet]\n        [Route(\"list\")]"));
    assert!(controller.contains("[HttpPut]\n        [Route(\"{id}\")]"));
    assert!(controller.contains("[HttpDelete]\n        [Route(\"{id}\")]"));
    assert!(controller.contains("[Route(\"{id}/authors/{publisherId}\")]"));
    assert!(controller.contains("return _service.UpdateAsync(id, input);"));
}

#[tokio::test]
async fn test_missing_directory() {
    let err = generate(&["crud", "Book", "-d", "/no/such/solution"])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DirectoryNotFound(_)));
}

#[tokio::test]
async fn test_missing_entity_faults_pipeline() {
    let dir = solution();
    let base = dir.path().to_string_lossy().into_owned();

    let err = generate(&["crud", "Author", "-d", &base]).await.unwrap_err();
    match err {
        AppError::PipelineFaulted { command, stage, reason } => {
            assert_eq!(command, "crud");
            assert_eq!(stage, "FindType(EntityInfo)");
            assert!(reason.contains("Author"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_exclude_applies_to_entity_search() {
    let dir = solution();
    let base = dir.path().to_string_lossy().into_owned();
    fs::remove_dir_all(dir.path().join("src/Acme.BookStore.Domain/Books")).unwrap();
    write(dir.path(), "src/Acme.BookStore.Domain/Legacy/Book.cs", BOOK);

    let err = generate(&[
        "crud",
        "Book",
        "-d",
        &base,
        "--exclude",
        "src/Acme.BookStore.Domain/Legacy/**",
    ])
    .await
    .unwrap_err();
    match err {
        AppError::PipelineFaulted { stage, .. } => assert_eq!(stage, "FindType(EntityInfo)"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("src/Acme.BookStore.Application/Legacy").exists());

    let written = generate(&["crud", "Book", "-d", &base]).await.unwrap();
    assert_eq!(written.len(), 5);
    assert!(dir
        .path()
        .join("src/Acme.BookStore.Application/Legacy/BookAppService.cs")
        .is_file());
}

#[tokio::test]
async fn test_missing_argument_is_usage_error() {
    let err = generate(&["crud"]).await.unwrap_err();
    assert!(matches!(err, AppError::Cli(_)));
}
